//! Server-side form drafts.
//!
//! A draft is the form state holder for one browser session: it keeps the
//! current snapshot, swaps in a new snapshot on every edit and allows a
//! single render at a time.

pub mod handlers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use parking_lot::RwLock;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::letters::{EditError, FormEdit};
use crate::models::{LetterForm, LetterKind};

pub struct Draft {
    form: RwLock<LetterForm>,
    busy: AtomicBool,
    created_at: DateTime<Utc>,
}

impl Draft {
    fn new(kind: LetterKind) -> Self {
        Self {
            form: RwLock::new(LetterForm::blank(kind)),
            busy: AtomicBool::new(false),
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> LetterKind {
        self.form.read().kind()
    }

    pub fn snapshot(&self) -> LetterForm {
        self.form.read().clone()
    }

    /// Replaces the snapshot with the result of `edit`. On error the current
    /// snapshot is kept.
    pub fn apply(&self, edit: &FormEdit) -> Result<LetterForm, EditError> {
        let mut form = self.form.write();
        let next = form.apply(edit)?;
        *form = next.clone();
        Ok(next)
    }

    pub fn reset(&self) -> LetterForm {
        let mut form = self.form.write();
        *form = form.reset();
        form.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Marks the draft busy. Returns `None` when a render is already in
    /// flight; the flag clears when the guard drops.
    pub fn try_begin_render(self: &Arc<Self>) -> Option<RenderGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RenderGuard {
                draft: Arc::clone(self),
            })
    }
}

/// Holds a draft's busy flag for the duration of one render.
pub struct RenderGuard {
    draft: Arc<Draft>,
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        self.draft.busy.store(false, Ordering::Release);
    }
}

/// JSON view of a draft.
#[derive(Debug, Serialize, ToSchema)]
pub struct DraftView {
    pub id: Uuid,
    pub kind: LetterKind,
    pub busy: bool,
    pub created_at: DateTime<Utc>,
    pub form: LetterForm,
}

impl DraftView {
    pub fn new(id: Uuid, draft: &Draft) -> Self {
        Self {
            id,
            kind: draft.kind(),
            busy: draft.is_busy(),
            created_at: draft.created_at,
            form: draft.snapshot(),
        }
    }
}

/// Drafts keyed by id, evicted after a period without access or when the
/// capacity is reached.
#[derive(Clone)]
pub struct DraftStore {
    cache: Cache<Uuid, Arc<Draft>>,
}

impl DraftStore {
    pub fn new(time_to_idle: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_idle(time_to_idle)
            .max_capacity(capacity)
            .build();
        Self { cache }
    }

    pub async fn create(&self, kind: LetterKind) -> (Uuid, Arc<Draft>) {
        let id = Uuid::new_v4();
        let draft = Arc::new(Draft::new(kind));
        self.cache.insert(id, Arc::clone(&draft)).await;
        log::debug!("Created {} draft {}", kind.slug(), id);
        (id, draft)
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<Draft>> {
        self.cache.get(id).await
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.cache.remove(id).await.is_some();
        if removed {
            log::debug!("Removed draft {}", id);
        }
        removed
    }
}
