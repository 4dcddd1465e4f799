mod assigner;
mod common;
