//! Scan-code encoding for the back of each card.
//!
//! The renderer only depends on [`ScanEncoder`], so tests can swap in an
//! encoder that fails or produces a fixed pattern.

use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

/// Modules of light border added around the code.
pub const QUIET_ZONE: usize = 1;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("scan payload is empty")]
    EmptyPayload,

    #[error("QR encoding failed: {0}")]
    Qr(String),
}

/// A square module grid, row-major, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    dark: Vec<bool>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize, dark: Vec<bool>) -> Result<Self, EncodingError> {
        if dark.len() != width * height {
            return Err(EncodingError::Qr(format!(
                "bitmap of {width}x{height} needs {} modules, got {}",
                width * height,
                dark.len()
            )));
        }
        Ok(Self {
            width,
            height,
            dark,
        })
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.dark[y * self.width + x]
    }

    /// 8-bit grey samples, row-major: 0 for dark modules, 255 for light.
    pub fn to_gray_samples(&self) -> Vec<u8> {
        self.dark.iter().map(|&d| if d { 0 } else { 255 }).collect()
    }
}

pub trait ScanEncoder: Send + Sync {
    fn encode(&self, payload: &str) -> Result<Bitmap, EncodingError>;
}

/// QR codes at error-correction level M.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrScanEncoder;

impl ScanEncoder for QrScanEncoder {
    fn encode(&self, payload: &str) -> Result<Bitmap, EncodingError> {
        if payload.is_empty() {
            return Err(EncodingError::EmptyPayload);
        }
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
            .map_err(|e| EncodingError::Qr(e.to_string()))?;

        let inner = code.width();
        let colors = code.to_colors();
        let side = inner + 2 * QUIET_ZONE;
        let mut dark = vec![false; side * side];
        for y in 0..inner {
            for x in 0..inner {
                if colors[y * inner + x] == Color::Dark {
                    dark[(y + QUIET_ZONE) * side + x + QUIET_ZONE] = true;
                }
            }
        }
        Bitmap::new(side, side, dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decodes a bitmap with rqrr after scaling it up and adding a wide border.
    fn decode(bitmap: &Bitmap) -> String {
        const SCALE: usize = 4;
        const BORDER: usize = 4;
        let side = (bitmap.width + 2 * BORDER) * SCALE;
        let mut img = rqrr::PreparedImage::prepare_from_greyscale(side, side, |x, y| {
            let (mx, my) = (x / SCALE, y / SCALE);
            if mx < BORDER || my < BORDER {
                return 255;
            }
            if bitmap.is_dark(mx - BORDER, my - BORDER) {
                0
            } else {
                255
            }
        });
        let grids = img.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR grid");
        let (_meta, content) = grids[0].decode().unwrap();
        content
    }

    #[test]
    fn test_round_trip_decodes_identifier() {
        let id = "spotify:track:4uLU6hMCjMI75M1A2tKUQC";
        let bitmap = QrScanEncoder.encode(id).unwrap();
        assert_eq!(decode(&bitmap), id);
    }

    #[test]
    fn test_bitmap_is_square_with_light_quiet_zone() {
        let bitmap = QrScanEncoder.encode("spotify:track:1").unwrap();
        assert_eq!(bitmap.width, bitmap.height);
        // Smallest QR version is 21 modules wide.
        assert!(bitmap.width >= 21 + 2 * QUIET_ZONE);
        for i in 0..bitmap.width {
            assert!(!bitmap.is_dark(i, 0));
            assert!(!bitmap.is_dark(0, i));
        }
        // Top-left finder pattern starts just inside the quiet zone.
        assert!(bitmap.is_dark(QUIET_ZONE, QUIET_ZONE));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = QrScanEncoder.encode("spotify:track:abc").unwrap();
        let b = QrScanEncoder.encode("spotify:track:abc").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_gray_samples() {
        let bitmap = Bitmap::new(2, 1, vec![true, false]).unwrap();
        assert_eq!(bitmap.to_gray_samples(), vec![0, 255]);
        assert!(Bitmap::new(2, 2, vec![true]).is_err());
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(matches!(
            QrScanEncoder.encode(""),
            Err(EncodingError::EmptyPayload)
        ));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = "x".repeat(4000);
        assert!(matches!(
            QrScanEncoder.encode(&payload),
            Err(EncodingError::Qr(_))
        ));
    }
}
