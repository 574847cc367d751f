use derive_more::Constructor;

/// Read-only access to the alpha channel of a raster image.
///
/// Coordinates are valid for `0 <= x < width` and `0 <= y < height`; alpha is
/// normalized to `[0, 1]`.
pub trait AlphaSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn alpha(&self, x: u32, y: u32) -> f32;
}

impl<T: AlphaSource + ?Sized> AlphaSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn alpha(&self, x: u32, y: u32) -> f32 {
        (**self).alpha(x, y)
    }
}

/// A plain row-major buffer of alpha values.
#[derive(Constructor, Debug, Clone, PartialEq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl AlphaMask {
    /// A fully transparent mask.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, vec![0.; width as usize * height as usize])
    }

    /// Builds a mask from rows of text, where `#` is opaque and anything else
    /// transparent. Handy for describing small test images.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut mask = Self::transparent(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    mask.set(x as u32, y as u32, 1.);
                }
            }
        }
        mask
    }

    pub fn set(&mut self, x: u32, y: u32, alpha: f32) {
        let index = y as usize * self.width as usize + x as usize;
        self.values[index] = alpha;
    }
}

impl AlphaSource for AlphaMask {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn alpha(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }
}
