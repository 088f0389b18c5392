use std::collections::HashMap;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tokio::select;
use tokio::task::JoinHandle;

use spanwire_gax::call::TryAs;
use spanwire_gax::cancel::CancellationToken;
use spanwire_gax::grpc::{Code, Status};
use spanwire_googleapis::spanner::v1::{
    BatchCreateSessionsRequest, CreateSessionRequest, DeleteSessionRequest, GetSessionRequest, ListSessionsRequest,
    Session,
};

use crate::apiv1::spanner_client::Client;

/// Session
///
/// A regular session serves one transaction at a time, which `&mut` access enforces. A
/// multiplexed session can be [shared](SessionHandle::share) by any number of concurrent
/// transactions.
pub struct SessionHandle {
    pub session: Session,
    pub spanner_client: Client,
    valid: Arc<AtomicBool>,
    created_at: Instant,
}

impl SessionHandle {
    pub(crate) fn new(session: Session, spanner_client: Client, now: Instant) -> SessionHandle {
        SessionHandle {
            session,
            spanner_client,
            valid: Arc::new(AtomicBool::new(true)),
            created_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.session.name
    }

    pub fn is_multiplexed(&self) -> bool {
        self.session.multiplexed
    }

    /// False once the server reported the session as gone.
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Another handle to the same multiplexed session. Handles share validity.
    /// Regular sessions can not be shared.
    pub fn share(&self) -> Option<SessionHandle> {
        if !self.is_multiplexed() {
            return None;
        }
        Some(SessionHandle {
            session: self.session.clone(),
            spanner_client: self.spanner_client.clone(),
            valid: Arc::clone(&self.valid),
            created_at: self.created_at,
        })
    }

    pub fn invalidate_if_needed<T>(&mut self, arg: Result<T, Status>) -> Result<T, Status> {
        match arg {
            Ok(s) => Ok(s),
            Err(e) => {
                if e.code() == Code::NotFound && e.message().contains("Session not found") {
                    tracing::debug!("session invalidate {}", self.session.name);
                    self.valid.store(false, Ordering::Release);
                }
                Err(e)
            }
        }
    }

    /// Reloads the session resource from the server.
    pub async fn refresh(&mut self, cancel: Option<&CancellationToken>) -> Result<(), Status> {
        let request = GetSessionRequest {
            name: self.session.name.clone(),
        };
        let result = self.spanner_client.get_session(request, cancel).await;
        let session = self.invalidate_if_needed(result)?.into_inner();
        self.session = session;
        Ok(())
    }

    pub async fn delete(&mut self, cancel: Option<&CancellationToken>) -> Result<(), Status> {
        let request = DeleteSessionRequest {
            name: self.session.name.clone(),
        };
        let result = self.spanner_client.delete_session(request, cancel).await;
        self.valid.store(false, Ordering::Release);
        match result {
            Ok(_) => {
                tracing::debug!("session deleted {}", self.session.name);
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to delete session {}, {:?}", self.session.name, e);
                Err(e)
            }
        }
    }
}

/// Attributes copied into every session created by this crate.
#[derive(Clone, Debug, Default)]
pub struct SessionTemplate {
    pub labels: HashMap<String, String>,
    pub creator_role: String,
}

impl SessionTemplate {
    fn to_session(&self, multiplexed: bool) -> Session {
        Session {
            name: String::new(),
            labels: self.labels.clone(),
            create_time: None,
            approximate_last_use_time: None,
            creator_role: self.creator_role.clone(),
            multiplexed,
        }
    }
}

pub async fn create_session(
    spanner_client: Client,
    database: &str,
    template: &SessionTemplate,
    multiplexed: bool,
) -> Result<SessionHandle, Status> {
    let request = CreateSessionRequest {
        database: database.to_string(),
        session: Some(template.to_session(multiplexed)),
    };
    let session = spanner_client.create_session(request, None).await?.into_inner();
    tracing::debug!("session created {} multiplexed={}", session.name, session.multiplexed);
    Ok(SessionHandle::new(session, spanner_client, Instant::now()))
}

pub async fn batch_create_sessions(
    spanner_client: Client,
    database: &str,
    template: &SessionTemplate,
    mut remaining_create_count: usize,
) -> Result<Vec<SessionHandle>, Status> {
    let mut created = Vec::with_capacity(remaining_create_count);
    while remaining_create_count > 0 {
        let sessions = batch_create_session(spanner_client.clone(), database, template, remaining_create_count).await?;
        // Spanner could return less sessions than requested.
        // In that case, we should do another call using the same client.
        let actually_created = sessions.len();
        if actually_created == 0 {
            return Err(Status::new(Code::Internal, "no session was created"));
        }
        remaining_create_count = remaining_create_count.saturating_sub(actually_created);
        created.extend(sessions);
    }
    Ok(created)
}

async fn batch_create_session(
    spanner_client: Client,
    database: &str,
    template: &SessionTemplate,
    session_count: usize,
) -> Result<Vec<SessionHandle>, Status> {
    let request = BatchCreateSessionsRequest {
        database: database.to_string(),
        session_template: Some(template.to_session(false)),
        session_count: session_count as i32,
    };

    tracing::debug!("session creation request : session_count = {}", session_count);
    let response = spanner_client.batch_create_sessions(request, None).await?.into_inner();

    let now = Instant::now();
    Ok(response
        .session
        .into_iter()
        .map(|s| SessionHandle::new(s, spanner_client.clone(), now))
        .collect::<Vec<SessionHandle>>())
}

/// Lists the sessions of the database, following page tokens until the last page.
pub async fn list_sessions(spanner_client: &Client, database: &str, filter: &str) -> Result<Vec<Session>, Status> {
    let mut sessions = vec![];
    let mut page_token = String::new();
    loop {
        let request = ListSessionsRequest {
            database: database.to_string(),
            page_size: 0,
            page_token,
            filter: filter.to_string(),
        };
        let response = spanner_client.list_sessions(request, None).await?.into_inner();
        sessions.extend(response.sessions);
        if response.next_page_token.is_empty() {
            return Ok(sessions);
        }
        page_token = response.next_page_token;
    }
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// How often the age of the multiplexed session is checked.
    pub refresh_interval: Duration,

    /// The multiplexed session is replaced once it is older than this.
    pub multiplexed_session_max_age: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            refresh_interval: Duration::from_secs(10 * 60),
            multiplexed_session_max_age: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("session manager closed")]
    Closed,
    #[error("server returned a regular session for a multiplexed request: {0}")]
    NotMultiplexed(String),
    #[error(transparent)]
    GRPC(#[from] Status),
}

impl TryAs<Status> for SessionError {
    fn try_as(&self) -> Option<&Status> {
        match self {
            SessionError::GRPC(e) => Some(e),
            _ => None,
        }
    }
}

struct MultiplexedSession {
    database: String,
    client: Client,
    template: SessionTemplate,
    current: RwLock<SessionHandle>,
    // held while a replacement session is being created
    replacing: tokio::sync::Mutex<()>,
}

impl MultiplexedSession {
    async fn create(client: Client, database: &str, template: &SessionTemplate) -> Result<SessionHandle, SessionError> {
        let session = create_session(client, database, template, true).await?;
        if !session.is_multiplexed() {
            return Err(SessionError::NotMultiplexed(session.session.name));
        }
        Ok(session)
    }

    /// Replaces the current session unless `keep` accepts it.
    /// Callers queue on `replacing`, so a session the previous caller created is checked again
    /// before another one is created.
    async fn replace_unless(&self, keep: impl Fn(&SessionHandle) -> bool) -> Result<(), SessionError> {
        let _guard = self.replacing.lock().await;
        let kept = { keep(&*self.current.read()) };
        if kept {
            return Ok(());
        }
        let session = Self::create(self.client.clone(), &self.database, &self.template).await?;
        let old = mem::replace(&mut *self.current.write(), session);
        tracing::debug!("multiplexed session replaced {}", old.session.name);
        Ok(())
    }

    fn share(&self) -> Option<SessionHandle> {
        let current = self.current.read();
        if current.is_valid() {
            current.share()
        } else {
            None
        }
    }
}

/// Keeps one multiplexed session alive for the database and hands out shared handles to it.
pub(crate) struct SessionManager {
    session: Arc<MultiplexedSession>,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl SessionManager {
    pub async fn new(
        database: impl Into<String>,
        client: Client,
        template: SessionTemplate,
        config: SessionConfig,
    ) -> Result<Arc<SessionManager>, SessionError> {
        let database = database.into();
        let current = MultiplexedSession::create(client.clone(), &database, &template).await?;
        let session = Arc::new(MultiplexedSession {
            database,
            client,
            template,
            current: RwLock::new(current),
            replacing: tokio::sync::Mutex::new(()),
        });
        let cancel = CancellationToken::new();
        let task = Self::spawn_refresh_task(config, session.clone(), cancel.clone());
        Ok(Arc::new(SessionManager {
            session,
            cancel,
            tasks: Mutex::new(vec![task]),
        }))
    }

    /// A shared handle to the current multiplexed session. An invalidated session is replaced first.
    pub async fn get(&self) -> Result<SessionHandle, SessionError> {
        if self.cancel.is_cancelled() {
            return Err(SessionError::Closed);
        }
        if let Some(session) = self.session.share() {
            return Ok(session);
        }
        self.session.replace_unless(|current| current.is_valid()).await?;
        let current = self.session.current.read();
        current
            .share()
            .ok_or_else(|| SessionError::NotMultiplexed(current.session.name.clone()))
    }

    /// A dedicated regular session, not tracked by the manager.
    pub async fn create_regular(&self) -> Result<SessionHandle, SessionError> {
        if self.cancel.is_cancelled() {
            return Err(SessionError::Closed);
        }
        let session = &self.session;
        Ok(create_session(session.client.clone(), &session.database, &session.template, false).await?)
    }

    pub(crate) fn database(&self) -> &str {
        &self.session.database
    }

    pub async fn close(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        let tasks = { mem::take(&mut *self.tasks.lock()) };
        for task in tasks {
            let _ = task.await;
        }
    }

    fn spawn_refresh_task(
        config: SessionConfig,
        session: Arc<MultiplexedSession>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let start = Instant::now() + config.refresh_interval;
        let mut interval = tokio::time::interval_at(start.into(), config.refresh_interval);

        tokio::spawn(async move {
            loop {
                select! {
                    _ = interval.tick() => {},
                    _ = cancel.cancelled() => break
                }
                let (expired, valid) = {
                    let current = session.current.read();
                    (
                        current.created_at().elapsed() >= config.multiplexed_session_max_age,
                        current.is_valid(),
                    )
                };
                if !expired && valid {
                    continue;
                }
                tracing::trace!("refresh multiplexed session expired={} valid={}", expired, valid);
                let max_age = config.multiplexed_session_max_age;
                let fresh = |current: &SessionHandle| current.is_valid() && current.created_at().elapsed() < max_age;
                if let Err(e) = session.replace_unless(fresh).await {
                    tracing::error!("failed to refresh multiplexed session {:?}", e);
                }
            }
            tracing::trace!("shutdown session refresh task.")
        })
    }
}
