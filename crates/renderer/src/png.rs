//! PNG output for rendered pin maps.
//!
//! Two encodings:
//! - **Indexed (color type 3)** when the image holds at most 256 colors, with a
//!   tRNS chunk if any palette entry is translucent.
//! - **RGBA (color type 6)** otherwise.
//!
//! [`encode_png`] picks the encoding automatically.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

use pinmap_common::{PinmapError, PinmapResult};

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for an indexed PNG.
const MAX_PALETTE_SIZE: usize = 256;

/// Pixel count from which palette extraction runs in parallel.
const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Colors of an indexed image plus one palette index per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub colors: Vec<[u8; 4]>,
    pub indices: Vec<u8>,
}

impl Palette {
    /// Build a palette, or `None` if the image has too many colors.
    pub fn extract(img: &RgbaImage) -> Option<Self> {
        let pixels = img.as_raw();
        if pixels.len() / 4 >= PARALLEL_THRESHOLD {
            extract_parallel(pixels)
        } else {
            extract_sequential(pixels)
        }
    }

    pub fn has_transparency(&self) -> bool {
        self.colors.iter().any(|c| c[3] < 255)
    }
}

#[inline(always)]
fn pack(px: &[u8]) -> u32 {
    u32::from_le_bytes([px[0], px[1], px[2], px[3]])
}

fn extract_sequential(pixels: &[u8]) -> Option<Palette> {
    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut colors = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.chunks_exact(4) {
        let key = pack(px);
        let index = match lookup.get(&key) {
            Some(&idx) => idx,
            None => {
                if colors.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = colors.len() as u8;
                colors.push([px[0], px[1], px[2], px[3]]);
                lookup.insert(key, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some(Palette { colors, indices })
}

/// Collect distinct colors per chunk in parallel, merge, then map every
/// pixel to its index in parallel.
fn extract_parallel(pixels: &[u8]) -> Option<Palette> {
    let chunk_px = (pixels.len() / 4 / rayon::current_num_threads()).max(256);

    let per_chunk: Vec<Option<HashSet<u32>>> = pixels
        .par_chunks(chunk_px * 4)
        .map(|chunk| {
            let mut seen = HashSet::with_capacity(MAX_PALETTE_SIZE);
            for px in chunk.chunks_exact(4) {
                seen.insert(pack(px));
                if seen.len() > MAX_PALETTE_SIZE {
                    return None;
                }
            }
            Some(seen)
        })
        .collect();

    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut colors = Vec::with_capacity(MAX_PALETTE_SIZE);
    for seen in per_chunk {
        for key in seen? {
            if lookup.contains_key(&key) {
                continue;
            }
            if colors.len() >= MAX_PALETTE_SIZE {
                return None;
            }
            lookup.insert(key, colors.len() as u8);
            colors.push(key.to_le_bytes());
        }
    }

    let indices: Vec<u8> = pixels
        .par_chunks_exact(4)
        .map(|px| lookup.get(&pack(px)).copied().unwrap_or(0))
        .collect();

    Some(Palette { colors, indices })
}

/// Encode as PNG, indexed when the colors fit a palette.
pub fn encode_png(img: &RgbaImage) -> PinmapResult<Vec<u8>> {
    match Palette::extract(img) {
        Some(palette) => {
            debug!(colors = palette.colors.len(), "Encoding indexed PNG");
            encode_png_indexed(img.width(), img.height(), &palette)
        }
        None => {
            debug!("Encoding RGBA PNG");
            encode_png_rgba(img)
        }
    }
}

/// Encode as a full-color RGBA PNG.
pub fn encode_png_rgba(img: &RgbaImage) -> PinmapResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header(img.width(), img.height(), 6));

    let idat = deflate_scanlines(img.as_raw(), img.width() as usize * 4, img.height() as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode an indexed PNG from a palette covering a `width x height` image.
pub fn encode_png_indexed(width: u32, height: u32, palette: &Palette) -> PinmapResult<Vec<u8>> {
    if palette.indices.len() != width as usize * height as usize {
        return Err(PinmapError::Encode(format!(
            "palette covers {} pixels, image has {}",
            palette.indices.len(),
            width as usize * height as usize
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header(width, height, 3));

    let plte: Vec<u8> = palette.colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.has_transparency() {
        let trns: Vec<u8> = palette.colors.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(&palette.indices, width as usize, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode and write a PNG file.
pub fn write_png<P: AsRef<Path>>(path: P, img: &RgbaImage) -> PinmapResult<()> {
    let bytes = encode_png(img)?;
    std::fs::write(path.as_ref(), &bytes)?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "Wrote PNG");
    Ok(())
}

/// IHDR payload: 8-bit samples, no interlace.
fn header(width: u32, height: u32, color_type: u8) -> Vec<u8> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);
    ihdr
}

/// Prefix each row with filter type 0 and zlib-compress.
fn deflate_scanlines(data: &[u8], row_bytes: usize, rows: usize) -> PinmapResult<Vec<u8>> {
    let mut raw = Vec::with_capacity(rows * (row_bytes + 1));
    for row in data.chunks_exact(row_bytes.max(1)).take(rows) {
        raw.push(0);
        raw.extend_from_slice(row);
    }
    if row_bytes == 0 {
        raw.resize(rows, 0);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&raw)
        .map_err(|e| PinmapError::Encode(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| PinmapError::Encode(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(kind);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_extract_palette_simple() {
        let img = RgbaImage::from_fn(2, 2, |x, y| {
            if x == y {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 255, 0, 255])
            }
        });
        let palette = Palette::extract(&img).unwrap();
        assert_eq!(palette.colors.len(), 2);
        assert_eq!(palette.indices, vec![0, 1, 1, 0]);
        assert!(!palette.has_transparency());
    }

    #[test]
    fn test_parallel_matches_sequential_colors() {
        let img = RgbaImage::from_fn(128, 128, |x, y| {
            let c = ((x / 8 + y / 8) % 50) as u8;
            Rgba([c * 5, 100 + c, 200 - c * 2, 255])
        });
        let par = extract_parallel(img.as_raw()).unwrap();
        let seq = extract_sequential(img.as_raw()).unwrap();
        assert_eq!(par.colors.len(), seq.colors.len());
        assert_eq!(par.indices.len(), 128 * 128);
        for (i, px) in img.pixels().enumerate() {
            assert_eq!(par.colors[par.indices[i] as usize], px.0);
        }
    }

    #[test]
    fn test_too_many_colors() {
        let img = RgbaImage::from_fn(300, 1, |x, _| Rgba([(x % 256) as u8, (x / 256) as u8, 0, 255]));
        assert!(Palette::extract(&img).is_none());
    }

    #[test]
    fn test_chunk_crc() {
        let mut png = Vec::new();
        write_chunk(&mut png, b"IEND", &[]);
        assert_eq!(png, vec![0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
    }
}
