pub mod current_weather;
pub mod forecast;
pub mod forecast_frame;
pub mod location;
pub mod report;
pub mod units;
