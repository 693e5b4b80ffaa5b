// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Rooms ---
        handlers::rooms::create_room,
        handlers::rooms::list_rooms,
        handlers::rooms::list_available_rooms,

        // --- Bookings ---
        handlers::bookings::create_booking,
        handlers::bookings::list_bookings,
        handlers::bookings::reschedule_booking,
        handlers::bookings::transition_booking,
        handlers::bookings::list_guests,

        // --- Tenancy ---
        handlers::tenancy::create_tenant,
        handlers::tenancy::list_tenants,
        handlers::tenancy::end_tenancy,
        handlers::tenancy::generate_invoice,
        handlers::tenancy::list_invoices,
        handlers::tenancy::pay_invoice,

        // --- HR ---
        handlers::hr::create_employee,
        handlers::hr::list_employees,
        handlers::hr::record_attendance,
        handlers::hr::monthly_payroll,

        // --- Finance ---
        handlers::finance::create_expense,
        handlers::finance::list_expenses,
        handlers::finance::expense_summary,

        // --- Tasks ---
        handlers::tasks::create_task,
        handlers::tasks::list_tasks,

        // --- Documents ---
        handlers::documents::booking_confirmation_pdf,
        handlers::documents::invoice_pdf,
        handlers::documents::monthly_report_pdf,
        handlers::documents::list_documents,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_revenue_chart,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Assistant ---
        handlers::assistant::chat,
    ),
    components(
        schemas(
            // --- Rooms ---
            models::rooms::RoomType,
            models::rooms::RoomStatus,
            models::rooms::Room,
            handlers::rooms::CreateRoomPayload,
            handlers::rooms::UpdateRoomPayload,

            // --- Bookings ---
            models::bookings::BookingStatus,
            models::bookings::RecordSource,
            models::bookings::Guest,
            models::bookings::Booking,
            models::bookings::BookingDetail,
            handlers::bookings::CreateBookingPayload,
            handlers::bookings::ReschedulePayload,
            handlers::bookings::TransitionBookingPayload,

            // --- Tenancy ---
            models::tenancy::TenantStatus,
            models::tenancy::InvoiceStatus,
            models::tenancy::Tenant,
            models::tenancy::Invoice,
            models::tenancy::InvoiceDetail,
            handlers::tenancy::CreateTenantPayload,
            handlers::tenancy::GenerateInvoicePayload,
            handlers::tenancy::SetInvoiceStatusPayload,

            // --- HR ---
            models::hr::EmployeeStatus,
            models::hr::Employee,
            models::hr::Attendance,
            models::hr::PayrollEntry,
            models::hr::PayrollSummary,
            handlers::hr::CreateEmployeePayload,
            handlers::hr::UpdateEmployeePayload,
            handlers::hr::RecordAttendancePayload,

            // --- Finance ---
            models::finance::ExpenseCategory,
            models::finance::Expense,
            models::finance::ExpenseSummaryEntry,
            handlers::finance::CreateExpensePayload,
            handlers::finance::UpdateExpensePayload,

            // --- Tasks ---
            models::tasks::TaskStatus,
            models::tasks::Task,
            handlers::tasks::CreateTaskPayload,
            handlers::tasks::UpdateTaskPayload,

            // --- Documents ---
            models::documents::DocumentKind,
            models::documents::GeneratedDocument,
            handlers::documents::MonthlyReportPayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::RevenueChartEntry,

            // --- Settings ---
            models::settings::PropertySettings,
            models::settings::UpdateSettingsRequest,
            models::settings::UiPreference,

            // --- Assistant ---
            models::assistant::ChatTurn,
            models::assistant::ChatRequest,
            models::assistant::ToolOutcome,
            models::assistant::ChatReply,
        )
    ),
    tags(
        (name = "Rooms", description = "Cadastro e disponibilidade de quartos"),
        (name = "Bookings", description = "Reservas de diária e hóspedes"),
        (name = "Guests", description = "Histórico de hóspedes"),
        (name = "Tenancy", description = "Aluguel mensal e faturas"),
        (name = "HR", description = "Funcionários, ponto e folha"),
        (name = "Finance", description = "Despesas e resumo por categoria"),
        (name = "Tasks", description = "Quadro de tarefas"),
        (name = "Documents", description = "Geração de PDFs e histórico"),
        (name = "Dashboard", description = "Indicadores e gráficos gerenciais"),
        (name = "Settings", description = "Configurações da propriedade e preferências de UI"),
        (name = "Assistant", description = "Assistente conversacional com tool calls")
    )
)]
pub struct ApiDoc;
