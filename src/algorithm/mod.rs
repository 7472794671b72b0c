/// Shared signature cache with pending-slot deduplication
pub mod cache;
/// Dancing links arena with reversible cover and uncover
pub mod links;
/// Constraint matrix construction for an area and its tile instances
pub mod matrix;
/// Worker pool distributing area tasks
pub mod scheduler;
/// Iterative Algorithm X search
pub mod search;
/// Per-area classification into fit statuses
pub mod solver;
