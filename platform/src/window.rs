use std::{
    cell::Cell,
    error::Error,
    fmt,
    mem::{size_of, MaybeUninit},
    ptr,
};
use game::{App, ClientRect, Dispatch, Event, Host, PixelBuffer, Pump};
use winapi::{
    ctypes::c_char,
    shared::{minwindef::*, windef::*},
    um::{
        libloaderapi::GetModuleHandleA,
        winuser::*,
    },
};
use crate::{
    debug::LastError,
    present::stretch_blit,
    time::Counter,
    win_check_non_null,
    win_check_non_zero,
};

thread_local! {
    // Set only while window creation or a message drain is in progress.
    static ATTACHED_APP: Cell<*mut App> = Cell::new(ptr::null_mut());
}

/// Lends `app` to the window procedure for the duration of `f`.
fn with_app_attached<R>(app: &mut App, f: impl FnOnce() -> R) -> R {
    let prev = ATTACHED_APP.with(|slot| slot.replace(app as *mut App));
    let result = f();
    ATTACHED_APP.with(|slot| slot.set(prev));
    result
}

#[derive(Copy, Clone, Debug)]
pub struct WindowConfig {
    /// NUL-terminated.
    pub class_name: &'static str,
    /// NUL-terminated.
    pub title: &'static str,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            class_name: "HandmadeHeroWindowClass\0",
            title: "Handmade Hero\0",
        }
    }
}

#[derive(Debug)]
pub struct WindowCreationError(pub LastError);

impl fmt::Display for WindowCreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window creation failed: {}", self.0)
    }
}

impl Error for WindowCreationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<LastError> for WindowCreationError {
    fn from(err: LastError) -> Self {
        Self(err)
    }
}

pub struct Window {
    handle: HWND,
    device_context: HDC,
    frame_counter: Counter,
}

impl Window {
    /// Registers the window class and opens a visible top-level window.
    ///
    /// `app` receives the resize sent while the window is being created, so
    /// its buffer already matches the client area when this returns.
    pub fn create(config: WindowConfig, app: &mut App) -> Result<Self, WindowCreationError> {
        debug_assert!(config.class_name.ends_with('\0') && config.title.ends_with('\0'));

        let instance = win_check_non_null!( GetModuleHandleA(ptr::null()) )?;
        let class = WNDCLASSEXA {
            cbSize: size_of::<WNDCLASSEXA>() as u32,
            style: CS_OWNDC | CS_HREDRAW,
            lpfnWndProc: Some(window_class_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: instance,
            hIcon: ptr::null_mut(),
            hCursor: ptr::null_mut(),
            hbrBackground: ptr::null_mut(),
            lpszMenuName: ptr::null_mut(),
            lpszClassName: config.class_name.as_ptr() as *const c_char,
            hIconSm: ptr::null_mut(),
        };
        win_check_non_zero!( RegisterClassExA(&class) )?;

        let handle = with_app_attached(app, || {
            win_check_non_null!(
                CreateWindowExA(
                    0,
                    class.lpszClassName,
                    config.title.as_ptr() as *const c_char,
                    WS_OVERLAPPEDWINDOW | WS_VISIBLE,
                    CW_USEDEFAULT,
                    CW_USEDEFAULT,
                    CW_USEDEFAULT,
                    CW_USEDEFAULT,
                    ptr::null_mut(),
                    ptr::null_mut(),
                    instance,
                    ptr::null_mut(),
                )
            )
        })?;

        // CS_OWNDC: the context stays valid for the window's lifetime
        let device_context = match win_check_non_null!( GetDC(handle) ) {
            Ok(device_context) => device_context,
            Err(err) => {
                unsafe { DestroyWindow(handle) };
                return Err(err.into());
            }
        };

        log::info!("window created: {:?}", client_rect_of(handle));
        Ok(Self {
            handle,
            device_context,
            frame_counter: Counter::start(),
        })
    }
}

impl Host for Window {
    fn drain_messages(&mut self, app: &mut App) -> Pump {
        with_app_attached(app, dispatch_messages)
    }

    fn client_rect(&self) -> ClientRect {
        client_rect_of(self.handle)
    }

    fn present(&mut self, buffer: &PixelBuffer, client: ClientRect) {
        stretch_blit(self.device_context, buffer, client);
    }

    fn frame_end(&mut self) {
        let elapsed = self.frame_counter.restart();
        log::trace!(
            "frame: {:>3.3} ms, {:>2.2} fps",
            elapsed.as_ms(),
            elapsed.as_secs().recip(),
        );
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Err(err) = win_check_non_zero!( DestroyWindow(self.handle) ) {
            log::error!("{}", err);
        }
    }
}

fn client_rect_of(window: HWND) -> ClientRect {
    let mut rect = MaybeUninit::<RECT>::uninit();
    match win_check_non_zero!( GetClientRect(window, rect.as_mut_ptr()) ) {
        Ok(_) => {
            let rect = unsafe { rect.assume_init() };
            ClientRect::from_edges(rect.left, rect.top, rect.right, rect.bottom)
        }
        Err(err) => {
            log::warn!("{}", err);
            ClientRect::default()
        }
    }
}

/// Message dispatch loop. Dispatches all messages in queue without waiting.
///
/// Returns `Pump::Quit` when WM_QUIT is received.
fn dispatch_messages() -> Pump {
    loop {
        let msg = unsafe {
            let mut msg = MaybeUninit::uninit();
            if PeekMessageA(msg.as_mut_ptr(), ptr::null_mut(), 0, 0, PM_REMOVE) != 0 {
                Some(msg.assume_init())
            } else {
                None
            }
        };

        match msg {
            None => break Pump::Continue,
            Some(msg) if msg.message == WM_QUIT => {
                deliver(Event::Quit);
                break Pump::Quit;
            }
            Some(msg) => unsafe {
                TranslateMessage(&msg);
                DispatchMessageA(&msg);
            },
        }
    }
}

/// `client` is only asked for on WM_SIZE.
fn translate(
    message: UINT,
    w_param: WPARAM,
    client: impl FnOnce() -> ClientRect,
) -> Option<Event> {
    match message {
        WM_SIZE => {
            let client = client();
            Some(Event::Resize {
                width: client.width,
                height: client.height,
            })
        }
        WM_CLOSE => Some(Event::Close),
        WM_DESTROY => Some(Event::Destroy),
        WM_PAINT => Some(Event::Paint),
        WM_ACTIVATEAPP => Some(Event::ActivateApp {
            active: w_param != 0,
        }),
        _ => None,
    }
}

/// Hands `event` to the attached app, if there is one.
fn deliver(event: Event) -> Option<Dispatch> {
    let app = ATTACHED_APP.with(Cell::get);
    if app.is_null() {
        return None;
    }
    // the borrow ends before anything can re-enter the window procedure
    Some(unsafe { (*app).handle_event(event) })
}

fn paint(window: HWND) {
    let mut paint = MaybeUninit::<PAINTSTRUCT>::uninit();
    let device_context = match win_check_non_null!( BeginPaint(window, paint.as_mut_ptr()) ) {
        Ok(device_context) => device_context,
        Err(err) => {
            log::warn!("{}", err);
            return;
        }
    };
    let client = client_rect_of(window);

    let app = ATTACHED_APP.with(Cell::get);
    if !app.is_null() {
        stretch_blit(device_context, unsafe { (*app).buffer() }, client);
    }

    unsafe { EndPaint(window, paint.as_ptr()) };
}

unsafe extern "system" fn window_class_proc(
    window_handle: HWND,
    message: UINT,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    let dispatch = match translate(message, w_param, || client_rect_of(window_handle)) {
        Some(event) => deliver(event),
        None => None,
    };

    match dispatch {
        Some(Dispatch::Handled) => 0,
        Some(Dispatch::Present) => {
            paint(window_handle);
            0
        }
        None => DefWindowProcA(window_handle, message, w_param, l_param),
    }
}
