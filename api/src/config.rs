use clap::Parser;

#[derive(Debug, Parser)]
#[clap(about = "REST proxy for the species catalog, with saved teams")]
pub struct Config {
    #[clap(long, env, default_value_t = String::from("127.0.0.1"))]
    pub host: String,
    #[clap(short, long, env, default_value_t = 7205)]
    pub port: u16,

    #[clap(long, env, default_value_t = String::from("production"))]
    pub env: String,

    #[clap(long = "db", env)]
    pub database_url: String,
    #[clap(long, env, default_value_t = 16)]
    pub db_max_connections: usize,

    #[clap(long, env, default_value_t = String::from(pokedex_catalog::DEFAULT_CATALOG_URL))]
    pub catalog_url: String,

    #[clap(long, env)]
    pub honeycomb_team: Option<String>,
    #[clap(long, env, default_value_t = String::from("pokedex"))]
    pub honeycomb_dataset: String,
}

impl Config {
    pub fn production(&self) -> bool {
        self.env != "development" && !cfg!(debug_assertions)
    }
}
