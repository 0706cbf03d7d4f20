/// Router Module Index
///
/// Organizes the application's routing into role-segregated modules. The split makes
/// the access model visible at the module level: every path in `superadmin.rs` belongs
/// to the superadmin role set, and so on. The gate itself runs inside each handler
/// (the same request must be resolvable as "maybe anonymous" first), so these modules
/// are about grouping and legibility, not enforcement.

/// Session endpoints and the probes: reachable without a session.
pub mod public;

/// Platform-wide management pages, superadmin only.
pub mod superadmin;

/// Tenant-scoped management pages, admin only.
pub mod admin;

/// Landing pages for the vendedor and tramitador roles.
pub mod staff;
