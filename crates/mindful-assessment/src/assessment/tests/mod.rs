mod common;
mod fallback;
mod normalizer;
