//! `Display` formatting for [`Matrix`].

use core::fmt;

use super::Matrix;

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "matrix([], shape=({}, {}))", self.rows, self.cols);
        }

        writeln!(f, "matrix([")?;
        for (r, row) in self.row_iter().enumerate() {
            write!(f, "  [")?;
            for (c, v) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                match f.precision() {
                    Some(p) => write!(f, "{v:.p$}")?,
                    None => write!(f, "{v}")?,
                }
            }
            if r < self.rows - 1 {
                writeln!(f, "],")?;
            } else {
                writeln!(f, "]")?;
            }
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_2x2() {
        let m = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        let s = format!("{m}");
        assert!(s.starts_with("matrix("));
        assert!(s.contains("[1, 2]"));
        assert!(s.contains("[3, 4]"));
    }

    #[test]
    fn test_display_precision() {
        let m = Matrix::from_rows(&[&[1.0 / 3.0]]).unwrap();
        assert!(format!("{m:.3}").contains("[0.333]"));
    }

    #[test]
    fn test_display_empty() {
        let m = Matrix::zeros(0, 2);
        assert_eq!(format!("{m}"), "matrix([], shape=(0, 2))");
    }
}
