pub mod aggregator;
pub mod calendar_utils;
pub mod conflict_resolver;
pub mod forecast_service;
pub mod hours_calculator;
pub mod monday_client;
pub mod report_service;
pub mod schedule_builder;
pub mod settings_service;
pub mod summary_editor;
pub mod token_service;
