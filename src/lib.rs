// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// How it is used
// - Tests import modules from this crate root to reach the code under test.
// - The binary in shell/main.rs wires the adapters declared here.

pub mod core {
    pub mod parse;
    pub mod ports;
    pub mod project;
    pub mod task_number;
    pub mod time_entry;
    pub mod user;
    pub mod cost {
        pub mod calculator;
        pub mod currency;
        pub mod rate_config;
    }
}

pub mod application {
    pub mod errors;
    pub mod identity;
    pub mod paging;
    pub mod command_handlers {
        pub mod task_catalog;
        pub mod time_entry_lifecycle;
    }
    pub mod query_handlers {
        pub mod monthly_report;
    }
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_directory;
        pub mod in_memory_entry_store;
    }
    pub mod inbound {
        pub mod http;
    }
}

pub mod shell {
    pub mod config;
    pub mod seed;
    pub mod state;
}
