//! Symbols the linker expects from a `panic = "abort"` target

#[cfg(debug_assertions)]
use super::board;

#[cfg(debug_assertions)]
use core::panic::PanicInfo;

#[allow(missing_docs)]
#[no_mangle]
pub extern "C" fn __aeabi_unwind_cpp_pr0() {}

#[allow(missing_docs)]
#[no_mangle]
pub extern "C" fn __aeabi_unwind_cpp_pr1() {}

#[allow(missing_docs, non_snake_case)]
#[no_mangle]
pub extern "C" fn _Unwind_Resume() {}

// Release builds link `panic-never` instead
#[cfg(debug_assertions)]
#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    board::safe();
}
