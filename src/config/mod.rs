use serde::Deserialize;
use std::env;

// Top-level configuration container, assembled once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub sections: SectionConfig,
    pub pricing: PricingConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Initial seat counts for the two sections.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    pub capacity_a: u32,
    pub capacity_b: u32,
}

// Price bands: strictly above `band_split` buys section A, anything from
// `band_min` up to and including `band_split` buys section B.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    pub band_min: u64,
    pub band_split: u64,
}

// Settings for the public gateway binary.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub port: u16,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seatbook=debug,tower_http=debug".to_string()),
            },
            sections: SectionConfig {
                capacity_a: env::var("SECTION_A_CAPACITY")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("SECTION_A_CAPACITY must be a valid number"),
                capacity_b: env::var("SECTION_B_CAPACITY")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .expect("SECTION_B_CAPACITY must be a valid number"),
            },
            pricing: PricingConfig {
                band_min: env::var("PRICE_BAND_MIN")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .expect("PRICE_BAND_MIN must be a valid number"),
                band_split: env::var("PRICE_BAND_SPLIT")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .expect("PRICE_BAND_SPLIT must be a valid number"),
            },
            gateway: GatewayConfig {
                port: env::var("GATEWAY_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .expect("GATEWAY_PORT must be a valid number"),
                api_url: env::var("BOOKING_API_URL")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            },
        }
    }
}
