use std::sync::Arc;

use crate::modules::board::use_cases::create_task::handler::CreateTaskHandler;
use crate::modules::board::use_cases::delete_task::handler::DeleteTaskHandler;
use crate::modules::board::use_cases::move_task::handler::MoveTaskHandler;
use crate::modules::board::use_cases::reorder_bucket::handler::ReorderBucketHandler;
use crate::modules::timers::core::policy::ReplacePolicy;
use crate::modules::timers::use_cases::start_timer::handler::StartTimerHandler;
use crate::modules::timers::use_cases::stop_timer::handler::StopTimerHandler;
use crate::shared::infrastructure::change_store::in_memory::InMemoryChangeStore;
use crate::shared::infrastructure::event_hub::{DEFAULT_CONNECTION_BUFFER, EventHub};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryChangeStore>,
    pub hub: Arc<EventHub>,
    pub create_task: Arc<CreateTaskHandler<InMemoryChangeStore>>,
    pub delete_task: Arc<DeleteTaskHandler<InMemoryChangeStore>>,
    pub reorder_bucket: Arc<ReorderBucketHandler<InMemoryChangeStore>>,
    pub move_task: Arc<MoveTaskHandler<InMemoryChangeStore>>,
    pub start_timer: Arc<StartTimerHandler<InMemoryChangeStore>>,
    pub stop_timer: Arc<StopTimerHandler<InMemoryChangeStore>>,
}

impl AppState {
    pub fn in_memory() -> Self {
        Self::in_memory_with_buffer(DEFAULT_CONNECTION_BUFFER)
    }

    pub fn in_memory_with_buffer(connection_buffer: usize) -> Self {
        let store = Arc::new(InMemoryChangeStore::new());
        let hub = Arc::new(EventHub::new(connection_buffer));
        Self {
            create_task: Arc::new(CreateTaskHandler::new(store.clone(), hub.clone())),
            delete_task: Arc::new(DeleteTaskHandler::new(store.clone(), hub.clone())),
            reorder_bucket: Arc::new(ReorderBucketHandler::new(store.clone(), hub.clone())),
            move_task: Arc::new(MoveTaskHandler::new(store.clone(), hub.clone())),
            start_timer: Arc::new(StartTimerHandler::new(
                store.clone(),
                hub.clone(),
                ReplacePolicy::default(),
            )),
            stop_timer: Arc::new(StopTimerHandler::new(store.clone(), hub.clone())),
            store,
            hub,
        }
    }
}
