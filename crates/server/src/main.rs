// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use checkin_report::{CoreError, ReportMode, TablePage, ViewCommand, ViewState, apply};
use checkin_report_api::{
    ApiError, Config, DEFAULT_BASE_URL, LOGIN_SUCCESS_MESSAGE, LoginRequest, REGIONS,
    ReportBackend, ReportOutcome, ReportRequest, SessionContext, SignupRequest, XanoClient,
    fetch_report, login, parse_request_date, signup,
};
use checkin_report_domain::{
    CSV_CONTENT_TYPE, CsvEncoding, CsvExport, Direction, DomainError, SchemaPolicy, export_csv,
};
use checkin_report_persistence::{
    FileSessionStore, MemorySessionStore, PersistenceError, SessionStore, StoredUser,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::LoggedIn;

/// Message returned when a second report request arrives while one is pending.
const REPORT_IN_PROGRESS_MESSAGE: &str = "A report request is already in progress.";

/// Check-in Report Server - local HTTP API for the check-in report dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Xano report API token
    #[arg(long, env = "XANO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Xano API base URL
    #[arg(long, env = "XANO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Report view served: `full` (region required) or `simple`
    #[arg(long, default_value = "full")]
    mode: ReportMode,

    /// Session file. Defaults to the user's local data directory.
    #[arg(long, conflicts_with = "memory_session")]
    session_file: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    memory_session: bool,

    /// Accept regions outside the known list
    #[arg(long)]
    allow_any_region: bool,

    /// Field holding the in/out direction, instead of detecting it
    #[arg(long)]
    status_key: Option<String>,

    /// Date field used for year grouping; repeat for fallbacks
    #[arg(long = "year-key")]
    year_keys: Vec<String>,

    /// Set aside rows whose fields differ from the first row
    #[arg(long)]
    quarantine: bool,

    /// Write CSV cells as JSON values instead of standard CSV quoting
    #[arg(long)]
    legacy_csv: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config: Config = Config::new(self.token.clone()).with_base_url(&self.base_url);
        config.check_regions = !self.allow_any_region;
        config.schema_hints.status_key.clone_from(&self.status_key);
        config.schema_hints.year_keys =
            (!self.year_keys.is_empty()).then(|| self.year_keys.clone());
        if self.quarantine {
            config.schema_policy = SchemaPolicy::Quarantine;
        }
        if self.legacy_csv {
            config.csv_encoding = CsvEncoding::JsonCells;
        }
        config
    }

    fn session_store(&self) -> Result<Box<dyn SessionStore + Send>, PersistenceError> {
        if self.memory_session {
            info!("Using in-memory session");
            return Ok(Box::new(MemorySessionStore::new()));
        }
        let store: FileSessionStore = match &self.session_file {
            Some(path) => FileSessionStore::open(path)?,
            None => FileSessionStore::open_default()?,
        };
        info!(path = %store.path().display(), "Using session file");
        Ok(Box::new(store))
    }
}

/// The report table.
struct ReportView {
    state: ViewState,
    /// Informational message from the last fetch.
    notice: Option<String>,
}

/// Marks a report request as in flight until dropped.
///
/// The flag is cleared however the request ends, including when the
/// handler is cancelled because the client went away.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    /// Claims the flag, or returns `None` if another request holds it.
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    mode: ReportMode,
    /// The remote API.
    backend: Arc<dyn ReportBackend>,
    /// The local session; the only owner of the session store.
    session: Arc<Mutex<SessionContext<Box<dyn SessionStore + Send>>>>,
    view: Arc<Mutex<ReportView>>,
    /// Set while a report request is in flight.
    loading: Arc<AtomicBool>,
}

impl AppState {
    fn new(
        config: Config,
        mode: ReportMode,
        backend: Arc<dyn ReportBackend>,
        session: SessionContext<Box<dyn SessionStore + Send>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            mode,
            backend,
            session: Arc::new(Mutex::new(session)),
            view: Arc::new(Mutex::new(ReportView {
                state: ViewState::new(mode),
                notice: None,
            })),
            loading: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// API response describing the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionResponse {
    logged_in: bool,
    /// Name shown in the account menu.
    display_name: String,
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl SessionResponse {
    fn from_session<S: SessionStore>(session: &SessionContext<S>, message: Option<&str>) -> Self {
        Self {
            logged_in: session.is_logged_in(),
            display_name: session.display_name().to_string(),
            email: session.user().map(|user: &StoredUser| user.email.clone()),
            message: message.map(str::to_string),
        }
    }
}

/// API response carrying a message only.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageResponse {
    message: String,
}

/// API response listing the known regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegionsResponse {
    regions: Vec<String>,
}

/// API request for fetching a report.
///
/// Dates are `YYYY-MM-DD`; blank or missing values are reported by
/// validation rather than rejected by deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct ReportApiRequest {
    start_date: Option<String>,
    end_date: Option<String>,
    /// Blank means all regions on the simple view.
    region: Option<String>,
}

/// A table interaction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum ViewCommandRequest {
    SetSearch { search: String },
    ToggleHide { direction: Direction },
    ToggleHideBoth,
    Sort { key: String },
    SetPage { page: usize },
    NextPage,
    PreviousPage,
    SetPageSize { page_size: usize },
    Clear,
}

impl From<ViewCommandRequest> for ViewCommand {
    fn from(request: ViewCommandRequest) -> Self {
        match request {
            ViewCommandRequest::SetSearch { search } => Self::SetSearch(search),
            ViewCommandRequest::ToggleHide { direction } => Self::ToggleHide(direction),
            ViewCommandRequest::ToggleHideBoth => Self::ToggleHideBoth,
            ViewCommandRequest::Sort { key } => Self::Sort(key),
            ViewCommandRequest::SetPage { page } => Self::SetPage(page),
            ViewCommandRequest::NextPage => Self::NextPage,
            ViewCommandRequest::PreviousPage => Self::PreviousPage,
            ViewCommandRequest::SetPageSize { page_size } => Self::SetPageSize(page_size),
            ViewCommandRequest::Clear => Self::Clear,
        }
    }
}

/// API response for the report table.
#[derive(Debug, Clone, Serialize)]
struct ReportViewResponse {
    loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    /// "Showing X of Y results".
    summary: String,
    page: TablePage,
}

impl ReportViewResponse {
    fn from_view(view: &ReportView, loading: bool) -> Self {
        let page: TablePage = view.state.render();
        Self {
            loading,
            notice: view.notice.clone(),
            summary: page.summary(),
            page,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::RequestFailed {
                status: Some(status),
                ..
            } if (400..500).contains(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::RequestFailed { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Session(_) => {
                error!(error = %err, "Session store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.message(),
        }
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        error!(error = %err, "CSV export failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/auth/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut session = app_state.session.lock().await;
    login(app_state.backend.as_ref(), &mut *session, &req).await?;

    Ok(Json(SessionResponse::from_session(
        &*session,
        Some(LOGIN_SUCCESS_MESSAGE),
    )))
}

/// Handler for POST `/auth/signup` endpoint.
///
/// Creates an account without logging in.
async fn handle_signup(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(email = %req.email, "Handling signup request");

    let message: &str = signup(app_state.backend.as_ref(), &req).await?;

    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}

/// Handler for POST `/auth/logout` endpoint.
///
/// Clears the session and the loaded report.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<SessionResponse>, HttpError> {
    let mut session = app_state.session.lock().await;
    session.logout()?;

    let mut view = app_state.view.lock().await;
    let cleared: ViewState = apply(&view.state, ViewCommand::Clear)?;
    view.state = cleared;
    view.notice = None;
    drop(view);

    info!("Logged out");

    Ok(Json(SessionResponse::from_session(&*session, None)))
}

/// Handler for GET `/session` endpoint.
async fn handle_get_session(AxumState(app_state): AxumState<AppState>) -> Json<SessionResponse> {
    let session = app_state.session.lock().await;
    Json(SessionResponse::from_session(&*session, None))
}

/// Handler for GET `/regions` endpoint.
async fn handle_list_regions() -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: REGIONS.iter().map(|region| (*region).to_string()).collect(),
    })
}

/// Handler for POST `/reports` endpoint.
///
/// Fetches a report and loads it into the table. Only one request may be
/// in flight at a time.
async fn handle_fetch_report(
    AxumState(app_state): AxumState<AppState>,
    LoggedIn(user): LoggedIn,
    Json(req): Json<ReportApiRequest>,
) -> Result<Json<ReportViewResponse>, HttpError> {
    info!(
        user = ?user.map(|user| user.email),
        start_date = ?req.start_date,
        end_date = ?req.end_date,
        region = ?req.region,
        "Handling report request"
    );

    let request: ReportRequest = ReportRequest {
        start_date: parse_request_date(req.start_date.as_deref()).map_err(ApiError::from)?,
        end_date: parse_request_date(req.end_date.as_deref()).map_err(ApiError::from)?,
        region: req.region,
    };

    let Some(in_flight) = InFlight::acquire(&app_state.loading) else {
        warn!("Rejected overlapping report request");
        return Err(HttpError {
            status: StatusCode::CONFLICT,
            message: String::from(REPORT_IN_PROGRESS_MESSAGE),
        });
    };

    let outcome: Result<ReportOutcome, ApiError> = fetch_report(
        app_state.backend.as_ref(),
        &app_state.config,
        app_state.mode,
        &request,
    )
    .await;

    drop(in_flight);
    let outcome: ReportOutcome = outcome?;

    let mut view = app_state.view.lock().await;
    let loaded: ViewState = apply(&view.state, ViewCommand::Load(outcome.result))?;
    view.state = loaded;
    view.notice = outcome.notice;

    Ok(Json(ReportViewResponse::from_view(
        &view,
        app_state.loading.load(Ordering::Acquire),
    )))
}

/// Handler for GET `/reports/view` endpoint.
async fn handle_get_view(
    AxumState(app_state): AxumState<AppState>,
    LoggedIn(_): LoggedIn,
) -> Json<ReportViewResponse> {
    let view = app_state.view.lock().await;
    Json(ReportViewResponse::from_view(
        &view,
        app_state.loading.load(Ordering::Acquire),
    ))
}

/// Handler for POST `/reports/view` endpoint.
///
/// Applies one table interaction and returns the new page.
async fn handle_view_command(
    AxumState(app_state): AxumState<AppState>,
    LoggedIn(_): LoggedIn,
    Json(req): Json<ViewCommandRequest>,
) -> Result<Json<ReportViewResponse>, HttpError> {
    let mut view = app_state.view.lock().await;
    let next: ViewState = apply(&view.state, req.into())?;
    view.state = next;
    Ok(Json(ReportViewResponse::from_view(
        &view,
        app_state.loading.load(Ordering::Acquire),
    )))
}

/// Handler for GET `/reports/export` endpoint.
///
/// Downloads the full fetched report as CSV, or 204 when nothing is loaded.
async fn handle_export(
    AxumState(app_state): AxumState<AppState>,
    LoggedIn(_): LoggedIn,
) -> Result<Response, HttpError> {
    let timestamp_ms: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    let view = app_state.view.lock().await;
    let export: Option<CsvExport> = export_csv(
        view.state.result.source_rows(),
        app_state.config.csv_encoding,
        timestamp_ms,
    )?;
    drop(view);

    let Some(export) = export else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    info!(file_name = %export.file_name, bytes = export.content.len(), "Exported CSV");

    Ok((
        [
            (header::CONTENT_TYPE, String::from(CSV_CONTENT_TYPE)),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        export.content,
    )
        .into_response())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(handle_login))
        .route("/auth/signup", post(handle_signup))
        .route("/auth/logout", post(handle_logout))
        .route("/session", get(handle_get_session))
        .route("/regions", get(handle_list_regions))
        .route("/reports", post(handle_fetch_report))
        .route("/reports/view", get(handle_get_view))
        .route("/reports/view", post(handle_view_command))
        .route("/reports/export", get(handle_export))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(mode = %args.mode, "Initializing check-in report server");

    let config: Config = args.config();
    if config.token().is_none() {
        warn!("No XANO_TOKEN configured; report requests will be rejected");
    }

    let backend: XanoClient = XanoClient::new(&config)?;
    let session: SessionContext<Box<dyn SessionStore + Send>> =
        SessionContext::restore(args.session_store()?)?;
    info!(
        logged_in = session.is_logged_in(),
        user = %session.display_name(),
        "Restored session"
    );

    let app_state: AppState = AppState::new(config, args.mode, Arc::new(backend), session);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
