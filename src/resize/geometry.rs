//! Size arithmetic for the aspect-preserving modes.
//!
//! All computations use integer math so results never depend on float rounding.
//! Fractional pixels are dropped (floor).

/// Size of an image scaled to fit entirely inside `width` x `height`.
///
/// The side with the tighter ratio binds and equals its target exactly; the
/// other side is rounded down. Small images are scaled up.
pub fn fit_within(src_width: u32, src_height: u32, width: u32, height: u32) -> (u32, u32) {
    let (sw, sh) = (src_width as u64, src_height as u64);
    let (tw, th) = (width as u64, height as u64);

    // width / sw <= height / sh  <=>  width * sh <= height * sw
    if tw * sh <= th * sw {
        (width, clamp_side(sh * tw / sw))
    } else {
        (clamp_side(sw * th / sh), height)
    }
}

/// Size of an image scaled to fully cover `width` x `height`.
///
/// When the source is wider than the target it is matched to the target height,
/// otherwise to the target width. The other side overshoots (or equals) its target.
pub fn cover(src_width: u32, src_height: u32, width: u32, height: u32) -> (u32, u32) {
    let (sw, sh) = (src_width as u64, src_height as u64);
    let (tw, th) = (width as u64, height as u64);

    // sw / sh > width / height  <=>  sw * height > width * sh
    if sw * th > tw * sh {
        (clamp_side(th * sw / sh).max(width), height)
    } else {
        (width, clamp_side(tw * sh / sw).max(height))
    }
}

/// Offset that centers `inner` inside `outer` along one axis (floor division).
///
/// Returns 0 when `inner` is not smaller than `outer`.
pub fn center_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

fn clamp_side(value: u64) -> u32 {
    value.clamp(1, u32::MAX as u64) as u32
}
