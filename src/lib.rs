pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod state_store;
    }
}

pub mod modules {
    pub mod ledger {
        pub mod core {
            pub mod approval_workflow;
            pub mod backup;
            pub mod calculators;
            pub mod commands;
            pub mod model;
            pub mod state;
            pub mod transition;
        }
        pub mod use_cases {
            pub mod errors;
            pub mod owner_document;
            pub mod dispatch_command {
                pub mod handler;
                pub mod inbound {
                    pub mod json;
                }
            }
            pub mod load_ledger {
                pub mod handler;
            }
            pub mod backup {
                pub mod handler;
            }
        }
    }
}

pub mod shell;

#[cfg(test)]
pub mod test_support {
    pub mod fixtures;
}
