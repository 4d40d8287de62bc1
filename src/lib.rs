// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// How it is used
// - Tests and the shell binary import modules from this crate root.

pub mod config;

pub mod shared {
    pub mod infrastructure {
        pub mod change_store;
        pub mod event_hub;
    }
}

pub mod modules {
    pub mod board {
        pub mod core {
            pub mod ordering;
        }
        pub mod use_cases {
            pub mod create_task {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_task {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_bucket_tasks {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod reorder_bucket {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod move_task {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
    pub mod timers {
        pub mod core {
            pub mod policy;
            pub mod state;
        }
        pub mod use_cases {
            pub mod start_timer {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod stop_timer {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_active_timer {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
    pub mod client {
        pub mod cache;
        pub mod drag_end;
        pub mod subscriber;
    }
}

pub mod shell {
    pub mod http;
    pub mod sse;
    pub mod state;
}
