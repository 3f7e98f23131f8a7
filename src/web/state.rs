use std::sync::Arc;
use tokio::sync::Mutex;

use crate::propagate::Sgp4Propagator;
use crate::session::{Scene, Session};

pub type LiveSession = Session<Sgp4Propagator, Scene>;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<LiveSession>>,
}

impl AppState {
    pub fn new(session: Arc<Mutex<LiveSession>>) -> Self {
        Self { session }
    }
}
