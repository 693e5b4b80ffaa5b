//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let room_routes = Router::new()
        .route("/"
               ,post(handlers::rooms::create_room)
               .get(handlers::rooms::list_rooms)
        )
        .route("/available", get(handlers::rooms::list_available_rooms))
        .route("/{id}"
               ,axum::routing::patch(handlers::rooms::update_room)
               .delete(handlers::rooms::delete_room)
        );

    let booking_routes = Router::new()
        .route("/"
               ,post(handlers::bookings::create_booking)
               .get(handlers::bookings::list_bookings)
        )
        .route("/{id}", axum::routing::delete(handlers::bookings::delete_booking))
        .route("/{id}/dates", axum::routing::patch(handlers::bookings::reschedule_booking))
        .route("/{id}/status", axum::routing::patch(handlers::bookings::transition_booking));

    let guest_routes = Router::new()
        .route("/", get(handlers::bookings::list_guests))
        .route("/{id}", get(handlers::bookings::get_guest));

    let tenant_routes = Router::new()
        .route("/"
               ,post(handlers::tenancy::create_tenant)
               .get(handlers::tenancy::list_tenants)
        )
        .route("/{id}/end", post(handlers::tenancy::end_tenancy))
        .route("/{id}/invoices", post(handlers::tenancy::generate_invoice));

    let invoice_routes = Router::new()
        .route("/", get(handlers::tenancy::list_invoices))
        .route("/{id}/pay", post(handlers::tenancy::pay_invoice))
        .route("/{id}/status", axum::routing::patch(handlers::tenancy::set_invoice_status));

    let hr_routes = Router::new()
        .route("/employees"
               ,post(handlers::hr::create_employee)
               .get(handlers::hr::list_employees)
        )
        .route("/employees/{id}"
               ,axum::routing::patch(handlers::hr::update_employee)
               .delete(handlers::hr::delete_employee)
        )
        .route("/attendance", post(handlers::hr::record_attendance))
        .route("/payroll", get(handlers::hr::monthly_payroll));

    let expense_routes = Router::new()
        .route("/"
               ,post(handlers::finance::create_expense)
               .get(handlers::finance::list_expenses)
        )
        .route("/summary", get(handlers::finance::expense_summary))
        .route("/{id}"
               ,axum::routing::patch(handlers::finance::update_expense)
               .delete(handlers::finance::delete_expense)
        );

    let task_routes = Router::new()
        .route("/"
               ,post(handlers::tasks::create_task)
               .get(handlers::tasks::list_tasks)
        )
        .route("/{id}"
               ,axum::routing::patch(handlers::tasks::update_task)
               .delete(handlers::tasks::delete_task)
        );

    let document_routes = Router::new()
        .route("/", get(handlers::documents::list_documents))
        .route("/bookings/{id}", post(handlers::documents::booking_confirmation_pdf))
        .route("/invoices/{id}", post(handlers::documents::invoice_pdf))
        .route("/reports/monthly", post(handlers::documents::monthly_report_pdf));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/revenue-chart", get(handlers::dashboard::get_revenue_chart));

    let settings_routes = Router::new()
        .route("/"
               ,get(handlers::settings::get_settings)
               .put(handlers::settings::update_settings)
        );

    let preference_routes = Router::new()
        .route("/{key}", put(handlers::settings::put_preference)
               .get(handlers::settings::get_preference));

    let assistant_routes = Router::new()
        .route("/chat", post(handlers::assistant::chat));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/rooms", room_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/guests", guest_routes)
        .nest("/api/tenants", tenant_routes)
        .nest("/api/invoices", invoice_routes)
        .nest("/api/hr", hr_routes)
        .nest("/api/expenses", expense_routes)
        .nest("/api/tasks", task_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/preferences", preference_routes)
        .nest("/api/assistant", assistant_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
