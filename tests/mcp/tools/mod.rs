mod config;
mod extract;
mod lookup;
mod synthesize;
