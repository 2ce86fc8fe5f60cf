mod brasilapi;
mod viacep;
mod weatherapi;

pub use brasilapi::BrasilApiAdapter;
pub use viacep::ViaCepAdapter;
pub use weatherapi::WeatherApiAdapter;
