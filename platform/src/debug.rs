use std::{error::Error, fmt};

/// A failed Win32 call together with what `GetLastError` had to say about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastError {
    pub function: &'static str,
    pub code: u32,
    pub message: String,
}

impl LastError {
    /// Must be called right after the failing function, before anything
    /// else gets a chance to overwrite the thread's last-error value.
    pub fn capture(function: &'static str) -> Self {
        use std::{ffi::CStr, mem::MaybeUninit, os::raw::c_char, ptr};
        use winapi::um::{
            errhandlingapi::GetLastError,
            winbase::{
                FormatMessageA,
                LocalFree,
                FORMAT_MESSAGE_ALLOCATE_BUFFER,
                FORMAT_MESSAGE_FROM_SYSTEM,
                FORMAT_MESSAGE_IGNORE_INSERTS,
            },
        };

        let code = unsafe { GetLastError() };

        let mut message_ptr = MaybeUninit::<*mut c_char>::uninit();
        let message_len = unsafe {
            FormatMessageA(
                FORMAT_MESSAGE_ALLOCATE_BUFFER
                    | FORMAT_MESSAGE_FROM_SYSTEM
                    | FORMAT_MESSAGE_IGNORE_INSERTS,
                ptr::null(),
                code,
                0,
                message_ptr.as_mut_ptr() as *mut _,
                0,
                ptr::null_mut(),
            )
        };
        let message = if message_len == 0 {
            format!("unknown error (FormatMessageA failed with {})", unsafe { GetLastError() })
        } else {
            unsafe {
                let message_ptr = message_ptr.assume_init();
                let message = CStr::from_ptr(message_ptr).to_string_lossy().trim_end().to_owned();
                LocalFree(message_ptr as *mut _);
                message
            }
        };

        Self { function, code, message }
    }
}

impl fmt::Display for LastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed. Error {}: {}", self.function, self.code, self.message)
    }
}

impl Error for LastError {}

/// Calls a Win32 function that reports failure with 0 and evaluates to
/// `Result<_, LastError>`.
#[macro_export]
macro_rules! win_check_non_zero {
    (
        $fn_name:ident( $($arg:expr),* $(,)? ) $(;)?
    ) => {
        {
            let result = unsafe { $fn_name($($arg),*) };
            if result == 0 {
                Err($crate::debug::LastError::capture(stringify!($fn_name)))
            } else {
                Ok(result)
            }
        }
    };
}

/// Same as `win_check_non_zero!` for functions returning handles.
#[macro_export]
macro_rules! win_check_non_null {
    (
        $fn_name:ident( $($arg:expr),* $(,)? ) $(;)?
    ) => {
        {
            let result = unsafe { $fn_name($($arg),*) };
            if result.is_null() {
                Err($crate::debug::LastError::capture(stringify!($fn_name)))
            } else {
                Ok(result)
            }
        }
    };
}
