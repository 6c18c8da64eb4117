use core::mem::{self, size_of};
use game::{BlitRect, ClientRect, PixelBuffer};
use winapi::{
    ctypes::c_void,
    shared::windef::HDC,
    um::wingdi::*,
};

fn bitmap_info(width: i32, height: i32) -> BITMAPINFO {
    BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height, //NOTE: negative means that bitmap is top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB,
            ..unsafe { mem::zeroed() }
        },
        bmiColors: unsafe { mem::zeroed() },
    }
}

/// Stretches the whole buffer over the whole client area of `device_context`.
/// Does nothing if either of them is empty.
pub fn stretch_blit(device_context: HDC, buffer: &PixelBuffer, client: ClientRect) {
    let blit = match BlitRect::full(buffer, client) {
        Some(blit) => blit,
        None => return,
    };
    let bitmap_info = bitmap_info(blit.src_width, blit.src_height);

    let blit_result = unsafe {
        StretchDIBits(
            device_context,
            0,
            0,
            blit.dst_width,
            blit.dst_height,
            0,
            0,
            blit.src_width,
            blit.src_height,
            buffer.pixels().as_ptr() as *const c_void,
            &bitmap_info,
            DIB_RGB_COLORS,
            SRCCOPY,
        )
    };
    if blit_result == 0 {
        log::warn!(
            "StretchDIBits failed. hdc: {:p}, dst: {}x{}, src: {}x{}",
            device_context,
            blit.dst_width,
            blit.dst_height,
            blit.src_width,
            blit.src_height,
        );
    }
}
