//! Sandpile handle creation and destruction.

use crate::sandpile::Sandpile;

/// Opaque handle type handed to the host.
pub type SandpileHandle = Sandpile;

/// Creates an uninitialized sandpile whose random source is seeded with `seed`.
///
/// # Returns
/// A pointer to a new handle. Call `sp_initialize` before dropping grains.
///
/// # Safety
/// The returned pointer must eventually be freed with `sp_destroy()`.
#[no_mangle]
pub extern "C" fn sp_create(seed: u64) -> *mut SandpileHandle {
    Box::into_raw(Box::new(Sandpile::seeded(seed)))
}

/// Destroys a sandpile handle and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `sp_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn sp_destroy(ptr: *mut SandpileHandle) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}
