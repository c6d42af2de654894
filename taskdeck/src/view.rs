//! Lane projection
//!
//! [`project`] turns a board snapshot and a search query into the three lanes
//! a renderer draws. Projection is pure: it never mutates the store, and the
//! same inputs always produce the same lanes.
//!
//! [`ViewProjector`] is the plumbing for reactive hosts. It watches a state
//! channel and a query channel and republishes a fresh [`BoardView`] whenever
//! either input changes.

use crate::error::BoardError;
use crate::types::{BoardPhase, BoardState, Status, Task};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// One lane of the board
#[derive(Debug, Clone, PartialEq)]
pub struct LaneView {
    /// The status this lane shows
    pub status: Status,
    /// Tasks in this lane, in board order
    pub tasks: Vec<Task>,
}

/// Everything a renderer needs to draw the board
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    /// Where the board is in its load lifecycle
    pub phase: BoardPhase,
    /// The most recent operation failure, passed through from the store
    pub error: Option<BoardError>,
    /// One lane per [`Status::ALL`] entry, in that order
    pub lanes: Vec<LaneView>,
}

impl BoardView {
    /// The lane for the given status
    pub fn lane(&self, status: Status) -> &LaneView {
        &self.lanes[status as usize]
    }

    /// Total number of tasks across all lanes
    pub fn task_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.tasks.len()).sum()
    }
}

/// Project a board snapshot into lanes, keeping only tasks whose title
/// contains the query (case-insensitive). An empty query keeps everything.
pub fn project(state: &BoardState, query: &str) -> BoardView {
    let needle = query.to_lowercase();
    let lanes = Status::ALL
        .iter()
        .map(|&status| LaneView {
            status,
            tasks: state
                .tasks
                .iter()
                .filter(|task| task.status == status && title_matches(&task.title, &needle))
                .cloned()
                .collect(),
        })
        .collect();

    BoardView {
        phase: state.phase,
        error: state.error.clone(),
        lanes,
    }
}

fn title_matches(title: &str, needle: &str) -> bool {
    needle.is_empty() || title.to_lowercase().contains(needle)
}

/// Keeps a projected view in step with a state channel and a query channel
pub struct ViewProjector {
    views: watch::Receiver<BoardView>,
    driver: Option<JoinHandle<()>>,
}

impl ViewProjector {
    /// Spawn the projector. The published view starts from the channels'
    /// current values and is recomputed whenever either changes.
    pub fn spawn(
        mut states: watch::Receiver<BoardState>,
        mut queries: watch::Receiver<String>,
    ) -> Self {
        let initial = project(&states.borrow(), &queries.borrow());
        let (tx, views) = watch::channel(initial);

        let driver = tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = states.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = queries.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
                let view = project(&states.borrow(), &queries.borrow());
                tx.send_replace(view);
            }
        });

        Self {
            views,
            driver: Some(driver),
        }
    }

    /// Subscribe to projected views
    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.views.clone()
    }

    /// The current projected view
    pub fn view(&self) -> BoardView {
        self.views.borrow().clone()
    }

    /// Stop reprojecting. The last published view stays readable.
    pub fn stop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

impl Drop for ViewProjector {
    fn drop(&mut self) {
        self.stop();
    }
}
