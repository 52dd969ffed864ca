// src/runtime/mod.rs
//
// Native support functions registered with the JIT by symbol name. Strings are
// NUL-terminated byte buffers; results are leaked into the JIT'd program's
// lifetime, which matches how compiled code owns its string temporaries.

use std::ffi::c_char;
use std::slice;

unsafe fn c_str_bytes<'a>(ptr: *const c_char) -> &'a [u8] {
    if ptr.is_null() {
        return &[];
    }
    let mut len = 0;
    // Safety: caller guarantees a NUL-terminated buffer.
    unsafe {
        while *ptr.add(len) != 0 {
            len += 1;
        }
        slice::from_raw_parts(ptr as *const u8, len)
    }
}

fn leak_string(bytes: Vec<u8>) -> *const c_char {
    let mut buffer = bytes;
    buffer.push(0);
    Box::leak(buffer.into_boxed_slice()).as_ptr() as *const c_char
}

/// Concatenate two strings into a fresh buffer.
///
/// # Safety
/// Both pointers must be NUL-terminated buffers or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spice_string_concat(
    lhs: *const c_char,
    rhs: *const c_char,
) -> *const c_char {
    let (a, b) = unsafe { (c_str_bytes(lhs), c_str_bytes(rhs)) };
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    leak_string(out)
}

/// Repeat a string `count` times. Non-positive counts yield the empty string.
///
/// # Safety
/// `text` must be a NUL-terminated buffer or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spice_string_repeat(text: *const c_char, count: i64) -> *const c_char {
    let bytes = unsafe { c_str_bytes(text) };
    let count = count.max(0) as usize;
    let mut out = Vec::with_capacity(bytes.len() * count);
    for _ in 0..count {
        out.extend_from_slice(bytes);
    }
    leak_string(out)
}

/// Byte-wise string equality; returns 1 for equal, 0 otherwise.
///
/// # Safety
/// Both pointers must be NUL-terminated buffers or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spice_string_eq(lhs: *const c_char, rhs: *const c_char) -> i8 {
    let (a, b) = unsafe { (c_str_bytes(lhs), c_str_bytes(rhs)) };
    (a == b) as i8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn as_str(ptr: *const c_char) -> &'static str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    #[test]
    fn concat() {
        let out = unsafe { spice_string_concat(c"foo".as_ptr(), c"bar".as_ptr()) };
        assert_eq!(as_str(out), "foobar");
    }

    #[test]
    fn concat_with_null_operand() {
        let out = unsafe { spice_string_concat(std::ptr::null(), c"x".as_ptr()) };
        assert_eq!(as_str(out), "x");
    }

    #[test]
    fn repeat() {
        let out = unsafe { spice_string_repeat(c"ab".as_ptr(), 3) };
        assert_eq!(as_str(out), "ababab");
        let empty = unsafe { spice_string_repeat(c"ab".as_ptr(), -1) };
        assert_eq!(as_str(empty), "");
    }

    #[test]
    fn eq() {
        assert_eq!(unsafe { spice_string_eq(c"a".as_ptr(), c"a".as_ptr()) }, 1);
        assert_eq!(unsafe { spice_string_eq(c"a".as_ptr(), c"b".as_ptr()) }, 0);
    }
}
