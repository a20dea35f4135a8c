use image::imageops::FilterType;

use crate::foundation::error::{PartycamError, PartycamResult};
use crate::raster::buffer::PixelBuffer;

/// Resize `src` to exactly `new_w × new_h`, preserving the channel layout.
///
/// Shrinking on both axes uses area averaging: every destination pixel is the coverage-weighted
/// mean of the source pixels under its footprint, which keeps thin sticker outlines from
/// aliasing. Any enlargement goes through the `image` crate's triangle (bilinear) filter.
pub fn resize(src: &PixelBuffer, new_w: u32, new_h: u32) -> PartycamResult<PixelBuffer> {
    if new_w == 0 || new_h == 0 {
        return Err(PartycamError::invalid_dimensions(format!(
            "resize target {new_w}x{new_h} must be non-zero"
        )));
    }
    if src.width() == 0 || src.height() == 0 {
        return Err(PartycamError::invalid_dimensions(format!(
            "cannot resize empty {}x{} buffer",
            src.width(),
            src.height()
        )));
    }
    if src.width() == new_w && src.height() == new_h {
        return Ok(src.clone());
    }

    if new_w <= src.width() && new_h <= src.height() {
        Ok(resize_area(src, new_w, new_h))
    } else {
        let resized = src
            .to_dynamic()?
            .resize_exact(new_w, new_h, FilterType::Triangle);
        Ok(PixelBuffer::from_dynamic(&resized))
    }
}

/// Per destination index: `(source index, weight)` pairs summing to one.
fn area_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f32)>> {
    let scale = f64::from(src_len) / f64::from(dst_len);
    (0..dst_len)
        .map(|i| {
            let start = f64::from(i) * scale;
            let end = (f64::from(i) + 1.0) * scale;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len as usize);
            (first..last)
                .filter_map(|j| {
                    let overlap = end.min(j as f64 + 1.0) - start.max(j as f64);
                    (overlap > 1e-9).then(|| (j, (overlap / scale) as f32))
                })
                .collect()
        })
        .collect()
}

fn resize_area(src: &PixelBuffer, new_w: u32, new_h: u32) -> PixelBuffer {
    let n = src.channels().count();
    let xw = area_weights(src.width(), new_w);
    let yw = area_weights(src.height(), new_h);

    // Horizontal pass into f32 rows, then vertical pass into bytes.
    let row_len = new_w as usize * n;
    let mut tmp = vec![0f32; src.height() as usize * row_len];
    for (src_row, tmp_row) in src
        .data()
        .chunks_exact(src.stride())
        .zip(tmp.chunks_exact_mut(row_len))
    {
        for (x, weights) in xw.iter().enumerate() {
            let out = &mut tmp_row[x * n..(x + 1) * n];
            for &(sx, w) in weights {
                for (c, o) in out.iter_mut().enumerate() {
                    *o += f32::from(src_row[sx * n + c]) * w;
                }
            }
        }
    }

    let mut out = PixelBuffer::new(new_w, new_h, src.channels());
    for (dst_row, weights) in out.data_mut().chunks_exact_mut(row_len).zip(&yw) {
        for (i, d) in dst_row.iter_mut().enumerate() {
            let acc: f32 = weights
                .iter()
                .map(|&(sy, w)| tmp[sy * row_len + i] * w)
                .sum();
            *d = acc.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resize.rs"]
mod tests;
