pub mod bills_pipeline;
