mod bridge;
mod utils;
