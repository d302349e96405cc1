// Public handlers need no token; protected handlers sit behind the JWT middleware
pub mod protected;
pub mod public;
