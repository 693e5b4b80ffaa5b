// src/services/document_service.rs

use chrono::{Datelike, Months, NaiveDate};
use genpdf::{elements, style, Element};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        BookingRepository, DocumentRepository, FinanceRepository, RoomRepository,
        SettingsRepository, TenancyRepository,
    },
    models::{
        bookings::BookingDetail,
        documents::DocumentKind,
        finance::ExpenseSummaryEntry,
        settings::PropertySettings,
        tenancy::InvoiceDetail,
    },
    services::booking_service::stay_nights,
};

const FONT_DIR: &str = "./fonts";

#[derive(Clone)]
pub struct DocumentService {
    bookings: BookingRepository,
    rooms: RoomRepository,
    tenancy: TenancyRepository,
    finance: FinanceRepository,
    documents: DocumentRepository,
    settings: SettingsRepository,
}

impl DocumentService {
    pub fn new(
        bookings: BookingRepository,
        rooms: RoomRepository,
        tenancy: TenancyRepository,
        finance: FinanceRepository,
        documents: DocumentRepository,
        settings: SettingsRepository,
    ) -> Self {
        Self {
            bookings,
            rooms,
            tenancy,
            finance,
            documents,
            settings,
        }
    }

    /// Confirmação de reserva em PDF. A renderização acontece ANTES da
    /// linha de auditoria: se a fonte faltar ou o render falhar, a
    /// transação nunca grava em generated_documents e o histórico só
    /// lista documentos que de fato saíram.
    pub async fn booking_confirmation<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
    ) -> Result<Vec<u8>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let settings = self.settings.get_settings().await?;

        let mut tx = executor.begin().await?;
        let detail = self.bookings.find_detail(&mut *tx, booking_id).await?;

        let title = format!("Confirmação de Reserva - {}", detail.room_number);
        let bytes = build_booking_confirmation(FONT_DIR, &settings, &detail, &title)?;

        self.documents
            .insert_document(
                &mut *tx,
                DocumentKind::BookingConfirmation,
                &title,
                Some(booking_id),
            )
            .await?;
        tx.commit().await?;

        Ok(bytes)
    }

    /// Fatura de aluguel mensal em PDF
    pub async fn invoice_pdf<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
    ) -> Result<Vec<u8>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let settings = self.settings.get_settings().await?;

        let mut tx = executor.begin().await?;
        let detail = self.tenancy.find_invoice_detail(&mut *tx, invoice_id).await?;

        let title = format!(
            "Fatura {} - {}",
            detail.invoice.reference_month.format("%m/%Y"),
            detail.tenant_name
        );
        let bytes = build_invoice(FONT_DIR, &settings, &detail, &title)?;

        self.documents
            .insert_document(&mut *tx, DocumentKind::Invoice, &title, Some(invoice_id))
            .await?;
        tx.commit().await?;

        Ok(bytes)
    }

    /// Relatório mensal: reservas, receita, ocupação e despesas por categoria
    pub async fn monthly_report<'e, E>(
        &self,
        executor: E,
        reference_month: NaiveDate,
    ) -> Result<Vec<u8>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let settings = self.settings.get_settings().await?;

        let month_start = reference_month
            .with_day(1)
            .ok_or_else(|| anyhow::anyhow!("data de referência inválida"))?;
        let month_end = month_start
            .checked_add_months(Months::new(1))
            .ok_or_else(|| anyhow::anyhow!("mês de referência fora do intervalo"))?;

        let expenses = self.finance.summary_by_category(month_start, month_end).await?;
        let room_count = self.rooms.list_rooms().await?.len() as i64;

        let mut tx = executor.begin().await?;
        let (bookings_count, revenue, occupied_nights) =
            self.bookings.month_stats(&mut *tx, month_start, month_end).await?;

        let title = format!("Relatório Mensal - {}", month_start.format("%m/%Y"));
        let bytes = build_monthly_report(
            FONT_DIR,
            &settings,
            &title,
            month_start,
            month_end,
            bookings_count,
            revenue,
            occupied_nights,
            room_count,
            &expenses,
        )?;

        self.documents
            .insert_document(&mut *tx, DocumentKind::MonthlyReport, &title, None)
            .await?;
        tx.commit().await?;

        Ok(bytes)
    }
}

// --- Montagem dos PDFs (pura: dados em memória -> bytes) ---

fn build_booking_confirmation(
    font_dir: &str,
    settings: &PropertySettings,
    detail: &BookingDetail,
    title: &str,
) -> Result<Vec<u8>, AppError> {
    let currency = settings.currency_symbol.as_deref().unwrap_or("R$");
    let nights = stay_nights(detail.booking.check_in, detail.booking.check_out);

    let mut doc = new_document(font_dir, settings.property_name.as_deref(), title)?;

    doc.push(
        elements::Paragraph::new("CONFIRMAÇÃO DE RESERVA")
            .styled(style::Style::new().bold().with_font_size(14)),
    );
    doc.push(elements::Break::new(1));

    doc.push(elements::Paragraph::new(format!("Hóspede: {}", detail.guest_name)));
    doc.push(elements::Paragraph::new(format!("Telefone: {}", detail.guest_phone)));
    doc.push(elements::Paragraph::new(format!("Quarto: {}", detail.room_number)));
    doc.push(elements::Paragraph::new(format!(
        "Período: {} a {} ({} noite(s))",
        detail.booking.check_in.format("%d/%m/%Y"),
        detail.booking.check_out.format("%d/%m/%Y"),
        nights
    )));
    doc.push(elements::Paragraph::new(format!(
        "Diária: {} {:.2}",
        currency,
        (detail.booking.total_price / Decimal::from(nights)).round_dp(2)
    )));

    doc.push(elements::Break::new(1));
    let mut total = elements::Paragraph::new(format!(
        "TOTAL: {} {:.2}",
        currency, detail.booking.total_price
    ));
    total.set_alignment(genpdf::Alignment::Right);
    doc.push(total.styled(style::Style::new().bold().with_font_size(12)));

    render(doc)
}

fn build_invoice(
    font_dir: &str,
    settings: &PropertySettings,
    detail: &InvoiceDetail,
    title: &str,
) -> Result<Vec<u8>, AppError> {
    let currency = settings.currency_symbol.as_deref().unwrap_or("R$");

    let mut doc = new_document(font_dir, settings.property_name.as_deref(), title)?;

    doc.push(
        elements::Paragraph::new(format!(
            "FATURA DE ALUGUEL - {}",
            detail.invoice.reference_month.format("%m/%Y")
        ))
        .styled(style::Style::new().bold().with_font_size(14)),
    );
    doc.push(elements::Break::new(1));

    doc.push(elements::Paragraph::new(format!("Inquilino: {}", detail.tenant_name)));
    doc.push(elements::Paragraph::new(format!("Quarto: {}", detail.room_number)));
    doc.push(elements::Paragraph::new(format!(
        "Vencimento: {}",
        detail.invoice.due_date.format("%d/%m/%Y")
    )));

    doc.push(elements::Break::new(1));
    let mut amount = elements::Paragraph::new(format!(
        "VALOR: {} {:.2}",
        currency, detail.invoice.amount
    ));
    amount.set_alignment(genpdf::Alignment::Right);
    doc.push(amount.styled(style::Style::new().bold().with_font_size(12)));

    render(doc)
}

#[allow(clippy::too_many_arguments)]
fn build_monthly_report(
    font_dir: &str,
    settings: &PropertySettings,
    title: &str,
    month_start: NaiveDate,
    month_end: NaiveDate,
    bookings_count: i64,
    revenue: Decimal,
    occupied_nights: i64,
    room_count: i64,
    expenses: &[ExpenseSummaryEntry],
) -> Result<Vec<u8>, AppError> {
    let currency = settings.currency_symbol.as_deref().unwrap_or("R$");

    let mut doc = new_document(font_dir, settings.property_name.as_deref(), title)?;

    doc.push(
        elements::Paragraph::new(format!(
            "RELATÓRIO MENSAL - {}",
            month_start.format("%m/%Y")
        ))
        .styled(style::Style::new().bold().with_font_size(14)),
    );
    doc.push(elements::Break::new(1));

    doc.push(elements::Paragraph::new(format!("Reservas no mês: {}", bookings_count)));
    doc.push(elements::Paragraph::new(format!(
        "Receita de reservas: {} {:.2}",
        currency, revenue
    )));

    // Ocupação: noites vendidas sobre noites disponíveis no mês
    let available_nights = room_count * (month_end - month_start).num_days();
    if available_nights > 0 {
        let rate = (Decimal::from(occupied_nights * 100)
            / Decimal::from(available_nights))
        .round_dp(1);
        doc.push(elements::Paragraph::new(format!("Taxa de ocupação: {}%", rate)));
    }
    doc.push(elements::Break::new(1));

    // Tabela de despesas: Categoria (3) | Total (2)
    doc.push(
        elements::Paragraph::new("Despesas por categoria")
            .styled(style::Style::new().bold()),
    );

    let mut table = elements::TableLayout::new(vec![3, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Categoria").styled(style_bold))
        .element(elements::Paragraph::new("Total").styled(style_bold))
        .push()
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    let mut total_expenses = Decimal::ZERO;
    for entry in expenses {
        let amount = entry.total.unwrap_or(Decimal::ZERO);
        total_expenses += amount;

        table
            .row()
            .element(elements::Paragraph::new(format!("{:?}", entry.category)))
            .element(elements::Paragraph::new(format!("{} {:.2}", currency, amount)))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
    }

    doc.push(table);
    doc.push(elements::Break::new(1));

    let mut result = elements::Paragraph::new(format!(
        "RESULTADO: {} {:.2}",
        currency,
        revenue - total_expenses
    ));
    result.set_alignment(genpdf::Alignment::Right);
    doc.push(result.styled(style::Style::new().bold().with_font_size(12)));

    render(doc)
}

fn new_document(
    font_dir: &str,
    property_name: Option<&str>,
    title: &str,
) -> Result<genpdf::Document, AppError> {
    // Carrega a fonte da pasta de fontes
    let font_family = genpdf::fonts::from_files(font_dir, "Roboto", None).map_err(|_| {
        AppError::FontNotFound(format!("Fonte não encontrada na pasta {}", font_dir))
    })?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(title);
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // Cabeçalho com o nome configurado da propriedade
    let header = property_name.unwrap_or("POUSADA").to_string();
    doc.push(
        elements::Paragraph::new(header)
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(elements::Break::new(1.5));

    Ok(doc)
}

fn render(doc: genpdf::Document) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::bookings::{Booking, BookingStatus, RecordSource};

    fn empty_settings() -> PropertySettings {
        PropertySettings {
            property_name: None,
            document_number: None,
            address: None,
            phone: None,
            email: None,
            currency_symbol: None,
            updated_at: None,
        }
    }

    fn booking_detail() -> BookingDetail {
        BookingDetail {
            booking: Booking {
                id: Uuid::new_v4(),
                guest_id: Uuid::new_v4(),
                room_id: Uuid::new_v4(),
                check_in: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                check_out: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                status: BookingStatus::Confirmed,
                total_price: Decimal::from(1000),
                source: RecordSource::Manual,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            guest_name: "Maria da Silva".to_string(),
            guest_phone: "11 99999-0000".to_string(),
            room_number: "A107".to_string(),
        }
    }

    // A montagem falha ANTES de qualquer escrita quando a fonte não
    // existe: o chamador nunca chega ao insert da trilha de auditoria.
    #[test]
    fn missing_font_dir_yields_font_not_found() {
        let result = build_booking_confirmation(
            "./fonts-que-nao-existem",
            &empty_settings(),
            &booking_detail(),
            "Confirmação de Reserva - A107",
        );

        assert!(matches!(result, Err(AppError::FontNotFound(_))));
    }

    #[test]
    fn monthly_report_fails_the_same_way_without_fonts() {
        let month_start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let month_end = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let result = build_monthly_report(
            "./fonts-que-nao-existem",
            &empty_settings(),
            "Relatório Mensal - 06/2024",
            month_start,
            month_end,
            3,
            Decimal::from(4500),
            6,
            10,
            &[],
        );

        assert!(matches!(result, Err(AppError::FontNotFound(_))));
    }
}
