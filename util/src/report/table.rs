use std::io;
use std::io::Write;

/// Lines of cells laid out in aligned columns.
///
/// Every cell but the last on a line is padded to the width of the widest
/// cell in its column plus `padding` spaces. The last cell is written as is.
/// Widths are counted in chars.
pub struct Table {
    padding: usize,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(padding: usize) -> Table {
        Table {
            padding,
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = Vec::new();

        for row in &self.rows {
            let aligned = row.len().saturating_sub(1);
            if widths.len() < aligned {
                widths.resize(aligned, 0);
            }
            for (i, cell) in row[..aligned].iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        widths
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let widths = self.widths();

        for row in &self.rows {
            let mut line = String::new();

            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let fill = widths[i] + self.padding - cell.chars().count();
                    line.extend(std::iter::repeat(' ').take(fill));
                }
            }

            writeln!(out, "{}", line)?;
        }

        Ok(())
    }
}
