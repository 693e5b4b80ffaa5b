// src/services/booking_service.rs
//
// A regra de disponibilidade e preço. A decisão é pura (funções abaixo,
// testáveis sem banco); a execução roda numa transação e conta com a
// exclusion constraint do banco como garantia final contra corrida
// entre dois clientes que passem pelo check ao mesmo tempo.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BookingRepository, RoomRepository},
    models::{
        bookings::{Booking, BookingStatus, Guest, RecordSource},
        rooms::{Room, RoomStatus},
    },
};

// --- A parte pura da regra ---

/// Resolve o rótulo digitado contra o registro de quartos, ignorando caixa
pub fn resolve_room<'r>(rooms: &'r [Room], label: &str) -> Option<&'r Room> {
    let wanted = label.to_lowercase();
    rooms.iter().find(|r| r.number.to_lowercase() == wanted)
}

/// Noites cobradas: diferença em dias, com piso de 1 (estadia same-day
/// paga uma diária)
pub fn stay_nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(1)
}

/// Teste de interseção de intervalos semiabertos [in, out)
pub fn intervals_overlap(
    a_in: NaiveDate,
    a_out: NaiveDate,
    b_in: NaiveDate,
    b_out: NaiveDate,
) -> bool {
    a_in < b_out && a_out > b_in
}

pub fn quote_total(nightly_price: Decimal, nights: i64) -> Decimal {
    nightly_price * Decimal::from(nights)
}

#[derive(Debug)]
pub struct BookingRequest {
    pub room_label: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_name: String,
    pub guest_phone: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GuestPlan {
    /// Já existe hóspede com mesmo (nome, telefone); reusa o id
    Existing(Uuid),
    New,
}

/// O que o create_booking vai executar, decidido sem efeito colateral
#[derive(Debug)]
pub struct BookingPlan {
    pub room_id: Uuid,
    pub nights: i64,
    pub total_price: Decimal,
    pub guest: GuestPlan,
}

/// Roda a cadeia de precondições na ordem do contrato:
/// 1. o rótulo resolve para exatamente um quarto (senão RoomNotFound);
/// 2. nenhuma reserva não-cancelada do quarto intersecta o pedido
///    (senão RoomUnavailable);
/// e só então calcula preço e decide reuso de hóspede.
pub fn plan_booking(
    rooms: &[Room],
    bookings: &[Booking],
    guests: &[Guest],
    request: &BookingRequest,
) -> Result<BookingPlan, AppError> {
    let room = resolve_room(rooms, &request.room_label)
        .ok_or_else(|| AppError::RoomNotFound(request.room_label.clone()))?;

    if request.check_out < request.check_in {
        return Err(invalid_range_error());
    }

    let conflict = bookings.iter().any(|b| {
        b.room_id == room.id
            && b.status != BookingStatus::Cancelled
            && intervals_overlap(b.check_in, b.check_out, request.check_in, request.check_out)
    });

    if conflict {
        return Err(AppError::RoomUnavailable);
    }

    let nights = stay_nights(request.check_in, request.check_out);

    let guest = guests
        .iter()
        .find(|g| g.full_name == request.guest_name && g.phone == request.guest_phone)
        .map(|g| GuestPlan::Existing(g.id))
        .unwrap_or(GuestPlan::New);

    Ok(BookingPlan {
        room_id: room.id,
        nights,
        total_price: quote_total(room.price, nights),
        guest,
    })
}

fn invalid_range_error() -> AppError {
    let mut errors = validator::ValidationErrors::new();
    let mut err = validator::ValidationError::new("invalid_range");
    err.message = Some("checkOut must not be before checkIn".into());
    errors.add("checkOut".into(), err);
    AppError::ValidationError(errors)
}

// --- O serviço (execução transacional do plano) ---

#[derive(Clone)]
pub struct BookingService {
    rooms: RoomRepository,
    bookings: BookingRepository,
}

impl BookingService {
    pub fn new(rooms: RoomRepository, bookings: BookingRepository) -> Self {
        Self { rooms, bookings }
    }

    /// Cria a reserva com tudo-ou-nada: hóspede (novo ou reusado),
    /// reserva CONFIRMED e histórico atualizados na mesma transação.
    pub async fn create_booking<'e, E>(
        &self,
        executor: E,
        request: BookingRequest,
        source: RecordSource,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let room = self
            .rooms
            .find_by_label(&mut *tx, &request.room_label)
            .await?
            .ok_or_else(|| AppError::RoomNotFound(request.room_label.clone()))?;

        if request.check_out < request.check_in {
            return Err(invalid_range_error());
        }

        // Caminho rápido: o mesmo check que o plano puro faz. A constraint
        // bookings_no_overlap cobre a janela entre este SELECT e o INSERT.
        let existing = self
            .bookings
            .list_active_for_room(&mut *tx, room.id, None)
            .await?;

        for b in &existing {
            if intervals_overlap(b.check_in, b.check_out, request.check_in, request.check_out) {
                return Err(AppError::RoomUnavailable);
            }
        }

        let nights = stay_nights(request.check_in, request.check_out);
        let total = quote_total(room.price, nights);

        let guest = match self
            .bookings
            .find_guest_by_name_phone(&mut *tx, &request.guest_name, &request.guest_phone)
            .await?
        {
            Some(g) => g,
            None => {
                self.bookings
                    .insert_guest(&mut *tx, &request.guest_name, &request.guest_phone)
                    .await?
            }
        };

        let booking = self
            .bookings
            .insert_booking(
                &mut *tx,
                guest.id,
                room.id,
                request.check_in,
                request.check_out,
                total,
                source,
            )
            .await?;

        self.bookings
            .append_guest_history(&mut *tx, guest.id, booking.id)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Reserva {} criada: quarto {}, {} noite(s), total {}",
            booking.id,
            room.number,
            nights,
            total
        );

        Ok(booking)
    }

    /// Reagendamento: as novas datas passam pela mesma regra, ignorando
    /// a própria reserva no teste de sobreposição.
    pub async fn reschedule_booking<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self
            .bookings
            .find_booking(&mut *tx, booking_id)
            .await?
            .ok_or(AppError::RecordNotFound)?;

        if check_out < check_in {
            return Err(invalid_range_error());
        }

        let room = self
            .rooms
            .find_by_id(&mut *tx, current.room_id)
            .await?
            .ok_or(AppError::RecordNotFound)?;

        let others = self
            .bookings
            .list_active_for_room(&mut *tx, room.id, Some(booking_id))
            .await?;

        for b in &others {
            if intervals_overlap(b.check_in, b.check_out, check_in, check_out) {
                return Err(AppError::RoomUnavailable);
            }
        }

        let total = quote_total(room.price, stay_nights(check_in, check_out));

        let updated = self
            .bookings
            .update_booking_dates(&mut *tx, booking_id, check_in, check_out, total)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Transição de status. Sem autômato: é atribuição simples disparada
    /// pelo usuário, com o efeito colateral convencional no quarto
    /// (check-in ocupa, check-out manda para limpeza, cancelar libera).
    pub async fn transition_booking<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let booking = self
            .bookings
            .update_status(&mut *tx, booking_id, new_status)
            .await?;

        let room_status = match new_status {
            BookingStatus::CheckedIn => Some(RoomStatus::Occupied),
            BookingStatus::CheckedOut => Some(RoomStatus::Cleaning),
            BookingStatus::Cancelled => Some(RoomStatus::Available),
            BookingStatus::Confirmed => None,
        };

        if let Some(status) = room_status {
            self.rooms.set_status(&mut *tx, booking.room_id, status).await?;
        }

        tx.commit().await?;

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn room(number: &str, price: i64) -> Room {
        Room {
            id: Uuid::new_v4(),
            number: number.to_string(),
            room_type: crate::models::rooms::RoomType::Double,
            price: Decimal::from(price),
            status: RoomStatus::Available,
            created_at: Utc::now(),
        }
    }

    fn booking(room_id: Uuid, guest_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            guest_id,
            room_id,
            check_in,
            check_out,
            status: BookingStatus::Confirmed,
            total_price: Decimal::ZERO,
            source: RecordSource::Manual,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn guest(name: &str, phone: &str) -> Guest {
        Guest {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            phone: phone.to_string(),
            history: vec![],
            created_at: Utc::now(),
        }
    }

    fn request(label: &str, check_in: NaiveDate, check_out: NaiveDate) -> BookingRequest {
        BookingRequest {
            room_label: label.to_string(),
            check_in,
            check_out,
            guest_name: "Maria da Silva".to_string(),
            guest_phone: "11 99999-0000".to_string(),
        }
    }

    #[test]
    fn books_free_room_and_prices_by_nights() {
        // O exemplo do contrato: A107 a 500/noite, 2 noites -> 1000
        let rooms = vec![room("A107", 500)];
        let req = request("A107", date(2024, 6, 1), date(2024, 6, 3));

        let plan = plan_booking(&rooms, &[], &[], &req).unwrap();

        assert_eq!(plan.nights, 2);
        assert_eq!(plan.total_price, Decimal::from(1000));
        assert_eq!(plan.guest, GuestPlan::New);
        assert_eq!(plan.room_id, rooms[0].id);
    }

    #[test]
    fn room_label_resolution_ignores_case() {
        let rooms = vec![room("A107", 500)];
        let req = request("a107", date(2024, 6, 1), date(2024, 6, 3));

        assert!(plan_booking(&rooms, &[], &[], &req).is_ok());
    }

    #[test]
    fn unknown_room_fails_before_anything_else() {
        let rooms = vec![room("A107", 500)];
        let req = request("B200", date(2024, 6, 1), date(2024, 6, 3));

        match plan_booking(&rooms, &[], &[], &req) {
            Err(AppError::RoomNotFound(label)) => assert_eq!(label, "B200"),
            other => panic!("esperava RoomNotFound, veio {:?}", other),
        }
    }

    #[test]
    fn overlapping_interval_is_rejected() {
        // Reserva existente [06-01, 06-03); pedido [06-02, 06-04) cruza
        let rooms = vec![room("A107", 500)];
        let g = guest("Maria da Silva", "11 99999-0000");
        let existing = vec![booking(rooms[0].id, g.id, date(2024, 6, 1), date(2024, 6, 3))];

        let req = request("A107", date(2024, 6, 2), date(2024, 6, 4));

        assert!(matches!(
            plan_booking(&rooms, &existing, &[g], &req),
            Err(AppError::RoomUnavailable)
        ));
    }

    #[test]
    fn back_to_back_stays_do_not_conflict() {
        // Intervalos semiabertos: sair dia 3 e entrar dia 3 convivem
        let rooms = vec![room("A107", 500)];
        let g = guest("Maria da Silva", "11 99999-0000");
        let existing = vec![booking(rooms[0].id, g.id, date(2024, 6, 1), date(2024, 6, 3))];

        let req = request("A107", date(2024, 6, 3), date(2024, 6, 5));

        assert!(plan_booking(&rooms, &existing, &[g], &req).is_ok());
    }

    #[test]
    fn cancelled_bookings_do_not_block() {
        let rooms = vec![room("A107", 500)];
        let g = guest("Maria da Silva", "11 99999-0000");
        let mut cancelled = booking(rooms[0].id, g.id, date(2024, 6, 1), date(2024, 6, 3));
        cancelled.status = BookingStatus::Cancelled;

        let req = request("A107", date(2024, 6, 2), date(2024, 6, 4));

        assert!(plan_booking(&rooms, &[cancelled], &[g], &req).is_ok());
    }

    #[test]
    fn repeating_the_same_request_is_rejected_the_second_time() {
        let rooms = vec![room("A107", 500)];
        let req = request("A107", date(2024, 6, 1), date(2024, 6, 3));

        // Primeira passa
        let plan = plan_booking(&rooms, &[], &[], &req).unwrap();

        // Aplica o plano em memória e repete o mesmo pedido
        let g = guest(&req.guest_name, &req.guest_phone);
        let created = booking(plan.room_id, g.id, req.check_in, req.check_out);

        assert!(matches!(
            plan_booking(&rooms, &[created], &[g], &req),
            Err(AppError::RoomUnavailable)
        ));
    }

    #[test]
    fn same_name_and_phone_reuses_the_guest() {
        let rooms = vec![room("A107", 500)];
        let g = guest("Maria da Silva", "11 99999-0000");
        let existing = vec![booking(rooms[0].id, g.id, date(2024, 6, 1), date(2024, 6, 3))];

        // Mesmo hóspede, datas livres
        let req = request("A107", date(2024, 6, 10), date(2024, 6, 12));
        let plan = plan_booking(&rooms, &existing, &[g.clone()], &req).unwrap();

        assert_eq!(plan.guest, GuestPlan::Existing(g.id));
    }

    #[test]
    fn different_phone_creates_a_new_guest() {
        let rooms = vec![room("A107", 500)];
        let g = guest("Maria da Silva", "11 88888-7777");

        let req = request("A107", date(2024, 6, 10), date(2024, 6, 12));
        let plan = plan_booking(&rooms, &[], &[g], &req).unwrap();

        assert_eq!(plan.guest, GuestPlan::New);
    }

    #[test]
    fn repeat_guest_accumulates_history_in_creation_order() {
        // Duas reservas do mesmo hóspede, aplicadas como o create_booking
        // faz: cada id entra no fim do histórico (array_append no banco)
        let rooms = vec![room("A107", 500), room("B201", 300)];

        let req1 = request("A107", date(2024, 6, 1), date(2024, 6, 3));
        let plan1 = plan_booking(&rooms, &[], &[], &req1).unwrap();
        assert_eq!(plan1.guest, GuestPlan::New);

        let mut g = guest(&req1.guest_name, &req1.guest_phone);
        let b1 = booking(plan1.room_id, g.id, req1.check_in, req1.check_out);
        g.history.push(b1.id);

        let bookings = vec![b1.clone()];
        let guests = vec![g];

        let req2 = request("B201", date(2024, 7, 1), date(2024, 7, 2));
        let plan2 = plan_booking(&rooms, &bookings, &guests, &req2).unwrap();
        assert_eq!(plan2.guest, GuestPlan::Existing(guests[0].id));

        let b2 = booking(plan2.room_id, guests[0].id, req2.check_in, req2.check_out);
        let mut g = guests.into_iter().next().unwrap();
        g.history.push(b2.id);

        assert_eq!(g.history, vec![b1.id, b2.id]);
    }

    #[test]
    fn same_day_stay_charges_one_night() {
        assert_eq!(stay_nights(date(2024, 6, 1), date(2024, 6, 1)), 1);

        let rooms = vec![room("A107", 500)];
        let req = request("A107", date(2024, 6, 1), date(2024, 6, 1));
        let plan = plan_booking(&rooms, &[], &[], &req).unwrap();

        assert_eq!(plan.total_price, Decimal::from(500));
    }

    #[test]
    fn check_out_before_check_in_is_a_validation_error() {
        let rooms = vec![room("A107", 500)];
        let req = request("A107", date(2024, 6, 3), date(2024, 6, 1));

        assert!(matches!(
            plan_booking(&rooms, &[], &[], &req),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn overlap_test_matches_the_half_open_contract() {
        let a = (date(2024, 6, 1), date(2024, 6, 3));

        // Cruza pela direita, pela esquerda, contido e contendo
        assert!(intervals_overlap(a.0, a.1, date(2024, 6, 2), date(2024, 6, 4)));
        assert!(intervals_overlap(a.0, a.1, date(2024, 5, 30), date(2024, 6, 2)));
        assert!(intervals_overlap(a.0, a.1, date(2024, 6, 1), date(2024, 6, 2)));
        assert!(intervals_overlap(a.0, a.1, date(2024, 5, 1), date(2024, 7, 1)));

        // Encostado não cruza
        assert!(!intervals_overlap(a.0, a.1, date(2024, 6, 3), date(2024, 6, 5)));
        assert!(!intervals_overlap(a.0, a.1, date(2024, 5, 30), date(2024, 6, 1)));
    }
}
