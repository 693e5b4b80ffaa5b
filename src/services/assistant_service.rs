// src/services/assistant_service.rs
//
// O assistente conversacional: repassa a mensagem ao endpoint de IA
// generativa com três tools declaradas (addBooking, getAvailableRooms,
// addTask) e executa no máximo uma function call devolvida, sempre por
// cima dos mesmos serviços que os formulários usam. O desenho do prompt
// não é responsabilidade daqui.

use chrono::{Days, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{RoomRepository, TaskRepository},
    models::{
        assistant::{ChatReply, ChatRequest, ChatTurn, ToolOutcome},
        bookings::RecordSource,
    },
    services::booking_service::{BookingRequest, BookingService},
};

// --- Protocolo do provedor (generateContent) ---

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    args: Option<Value>,
}

// --- Argumentos das tools (como o modelo manda, em camelCase) ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBookingArgs {
    room_number: String,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guest_name: String,
    guest_phone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailableRoomsArgs {
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddTaskArgs {
    title: String,
    details: Option<String>,
    due_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct AssistantService {
    booking_service: BookingService,
    rooms: RoomRepository,
    tasks: TaskRepository,
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl AssistantService {
    pub fn new(
        booking_service: BookingService,
        rooms: RoomRepository,
        tasks: TaskRepository,
        api_url: String,
        api_key: String,
    ) -> Self {
        Self {
            booking_service,
            rooms,
            tasks,
            http: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    pub async fn chat(&self, pool: &PgPool, request: ChatRequest) -> Result<ChatReply, AppError> {
        if self.api_key.is_empty() {
            return Err(AppError::AssistantUpstream(
                "ASSISTANT_API_KEY não configurada".to_string(),
            ));
        }

        let body = build_upstream_request(&request.message, request.history.as_deref());

        let url = format!("{}?key={}", self.api_url, self.api_key);
        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(AppError::AssistantUpstream(format!(
                "resposta {} do provedor",
                response.status()
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let (text, call) = split_response(parsed);

        let tool_outcome = match call {
            Some(call) => Some(
                self.execute_tool(pool, &call.name, call.args.unwrap_or(Value::Null))
                    .await?,
            ),
            None => None,
        };

        let reply = match (&text, &tool_outcome) {
            (Some(t), _) => t.clone(),
            // Modelo só devolveu a function call; resume o resultado
            (None, Some(outcome)) => format!("OK: {} executada.", outcome.name),
            (None, None) => String::new(),
        };

        Ok(ChatReply {
            reply,
            tool_outcome,
        })
    }

    /// Despacho das tools. Separado do HTTP para ser testável e para o
    /// handler de reservas e o assistente compartilharem o mesmo caminho.
    pub async fn execute_tool(
        &self,
        pool: &PgPool,
        name: &str,
        args: Value,
    ) -> Result<ToolOutcome, AppError> {
        match name {
            "addBooking" => {
                let args: AddBookingArgs = decode_args(name, args)?;

                let booking = self
                    .booking_service
                    .create_booking(
                        pool,
                        BookingRequest {
                            room_label: args.room_number,
                            check_in: args.check_in,
                            check_out: args.check_out,
                            guest_name: args.guest_name,
                            guest_phone: args.guest_phone,
                        },
                        RecordSource::Ai,
                    )
                    .await?;

                Ok(ToolOutcome {
                    name: name.to_string(),
                    result: json!({
                        "bookingId": booking.id,
                        "totalPrice": booking.total_price,
                        "status": booking.status,
                    }),
                })
            }

            "getAvailableRooms" => {
                let args: AvailableRoomsArgs = decode_args(name, args)?;

                // Sem datas, assume a diária de hoje
                let today = Utc::now().date_naive();
                let check_in = args.check_in.unwrap_or(today);
                let check_out = args
                    .check_out
                    .unwrap_or_else(|| check_in.checked_add_days(Days::new(1)).unwrap_or(check_in));

                let rooms = self.rooms.list_available(check_in, check_out).await?;

                let listing: Vec<Value> = rooms
                    .iter()
                    .map(|r| {
                        json!({
                            "number": r.number,
                            "roomType": r.room_type,
                            "price": r.price,
                        })
                    })
                    .collect();

                Ok(ToolOutcome {
                    name: name.to_string(),
                    result: json!({ "rooms": listing }),
                })
            }

            "addTask" => {
                let args: AddTaskArgs = decode_args(name, args)?;

                let task = self
                    .tasks
                    .create_task(
                        &args.title,
                        args.details.as_deref(),
                        args.due_date,
                        None,
                        RecordSource::Ai,
                    )
                    .await?;

                Ok(ToolOutcome {
                    name: name.to_string(),
                    result: json!({ "taskId": task.id, "status": task.status }),
                })
            }

            other => Err(AppError::AssistantUpstream(format!(
                "tool desconhecida: {}",
                other
            ))),
        }
    }
}

fn decode_args<T: serde::de::DeserializeOwned>(tool: &str, args: Value) -> Result<T, AppError> {
    serde_json::from_value(args).map_err(|e| {
        AppError::AssistantUpstream(format!("argumentos inválidos para {}: {}", tool, e))
    })
}

/// Monta o corpo do generateContent: histórico + mensagem + declarações
/// das tools. O schema segue o formato de function declarations do
/// provedor.
fn build_upstream_request(message: &str, history: Option<&[ChatTurn]>) -> Value {
    let mut contents: Vec<Value> = Vec::new();

    if let Some(turns) = history {
        for turn in turns {
            contents.push(json!({
                "role": turn.role,
                "parts": [{ "text": turn.text }],
            }));
        }
    }

    contents.push(json!({
        "role": "user",
        "parts": [{ "text": message }],
    }));

    json!({
        "contents": contents,
        "tools": [{
            "functionDeclarations": [
                {
                    "name": "addBooking",
                    "description": "Cria uma reserva de quarto para um hóspede",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "roomNumber": { "type": "string" },
                            "checkIn":    { "type": "string", "format": "date" },
                            "checkOut":   { "type": "string", "format": "date" },
                            "guestName":  { "type": "string" },
                            "guestPhone": { "type": "string" }
                        },
                        "required": ["roomNumber", "checkIn", "checkOut", "guestName", "guestPhone"]
                    }
                },
                {
                    "name": "getAvailableRooms",
                    "description": "Lista os quartos livres num período",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "checkIn":  { "type": "string", "format": "date" },
                            "checkOut": { "type": "string", "format": "date" }
                        }
                    }
                },
                {
                    "name": "addTask",
                    "description": "Adiciona uma tarefa ao quadro",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "title":   { "type": "string" },
                            "details": { "type": "string" },
                            "dueDate": { "type": "string", "format": "date" }
                        },
                        "required": ["title"]
                    }
                }
            ]
        }]
    })
}

/// Separa o texto da (eventual) function call da primeira candidata
fn split_response(response: GenerateContentResponse) -> (Option<String>, Option<FunctionCall>) {
    let mut text: Option<String> = None;
    let mut call: Option<FunctionCall> = None;

    let parts = response
        .candidates
        .and_then(|mut c| if c.is_empty() { None } else { c.swap_remove(0).content })
        .and_then(|content| content.parts)
        .unwrap_or_default();

    for part in parts {
        if let Some(t) = part.text {
            match &mut text {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(&t);
                }
                None => text = Some(t),
            }
        }
        if call.is_none() {
            call = part.function_call;
        }
    }

    (text, call)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_add_booking_args_in_camel_case() {
        let args: AddBookingArgs = decode_args(
            "addBooking",
            json!({
                "roomNumber": "A107",
                "checkIn": "2024-06-01",
                "checkOut": "2024-06-03",
                "guestName": "Maria da Silva",
                "guestPhone": "11 99999-0000"
            }),
        )
        .unwrap();

        assert_eq!(args.room_number, "A107");
        assert_eq!(args.check_in.to_string(), "2024-06-01");
    }

    #[test]
    fn rejects_malformed_tool_args() {
        let result: Result<AddBookingArgs, _> =
            decode_args("addBooking", json!({ "roomNumber": "A107" }));

        assert!(matches!(result, Err(AppError::AssistantUpstream(_))));
    }

    #[test]
    fn splits_text_and_function_call_from_response() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Vou reservar o quarto." },
                        { "functionCall": {
                            "name": "addBooking",
                            "args": { "roomNumber": "A107" }
                        }}
                    ]
                }
            }]
        });

        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let (text, call) = split_response(parsed);

        assert_eq!(text.as_deref(), Some("Vou reservar o quarto."));
        assert_eq!(call.unwrap().name, "addBooking");
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        let (text, call) = split_response(parsed);

        assert!(text.is_none());
        assert!(call.is_none());
    }

    #[test]
    fn upstream_request_carries_history_and_tools() {
        let history = vec![ChatTurn {
            role: "user".to_string(),
            text: "Oi".to_string(),
        }];

        let body = build_upstream_request("Tem quarto livre?", Some(&history));

        assert_eq!(body["contents"].as_array().unwrap().len(), 2);
        assert_eq!(
            body["tools"][0]["functionDeclarations"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }
}
