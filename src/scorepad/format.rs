use super::builder::{ScorePad, ScorePadRow};
use super::headers::RowHeader;
use crate::error::Result;
use std::io::Write;

/// Turns a score pad into rows of text cells for display or export
#[derive(Debug, Clone)]
pub struct ScorePadFormatter {
    /// Shown for arrow slots not yet shot
    pub placeholder: String,
    /// Between arrows of an end
    pub delimiter: String,
    /// Shown where a row has no running total
    pub no_total: String,
    pub distance_total_label: String,
    pub grand_total_label: String,
    /// Arrows cell of the surplus total; the surplus partition is unlabeled by default
    pub surplus_label: String,
    /// List each end's arrows best first
    pub sort_ends: bool,
}

impl Default for ScorePadFormatter {
    fn default() -> Self {
        Self {
            placeholder: ".".to_string(),
            delimiter: " ".to_string(),
            no_total: "-".to_string(),
            distance_total_label: "Total".to_string(),
            grand_total_label: "Grand Total".to_string(),
            surplus_label: String::new(),
            sort_ends: false,
        }
    }
}

impl ScorePadFormatter {
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    pub fn with_sorted_ends(mut self) -> Self {
        self.sort_ends = true;
        self
    }

    pub fn column_titles(&self, pad: &ScorePad) -> Vec<String> {
        vec![
            String::new(),
            "Arrows".to_string(),
            "H".to_string(),
            "S".to_string(),
            pad.golds_type.short_name().to_string(),
            "R/T".to_string(),
        ]
    }

    pub fn header_label(&self, header: &RowHeader) -> String {
        match header {
            RowHeader::End(number) => number.to_string(),
            RowHeader::DistanceTotal => self.distance_total_label.clone(),
            RowHeader::GrandTotal => self.grand_total_label.clone(),
        }
    }

    pub fn row_cells(&self, header: &RowHeader, row: &ScorePadRow) -> Vec<String> {
        let (arrows, running_total) = match row {
            ScorePadRow::End(end_row) => {
                let end = if self.sort_ends {
                    end_row.end.sorted_for_display()
                } else {
                    end_row.end.clone()
                };
                (
                    end.to_display_string(&self.placeholder, &self.delimiter),
                    end_row.running_total.to_string(),
                )
            }
            ScorePadRow::DistanceTotal(total) => (
                total
                    .distance
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| self.surplus_label.clone()),
                self.no_total.clone(),
            ),
            ScorePadRow::GrandTotal(_) => (String::new(), self.no_total.clone()),
        };

        vec![
            self.header_label(header),
            arrows,
            row.hits().to_string(),
            row.score().to_string(),
            row.golds().to_string(),
            running_total,
        ]
    }

    /// Every row of the pad as text cells, without the column titles
    pub fn cells(&self, pad: &ScorePad) -> Result<Vec<Vec<String>>> {
        let headers = pad.row_headers()?;
        Ok(headers
            .iter()
            .zip(&pad.rows)
            .map(|(header, row)| self.row_cells(header, row))
            .collect())
    }

    pub fn write_csv<W: Write>(&self, pad: &ScorePad, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(self.column_titles(pad))?;
        for record in self.cells(pad)? {
            out.write_record(&record)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::round::fixtures::*;
    use crate::model::Arrow;

    fn pad() -> ScorePad {
        let shot = vec![
            Arrow::ring(9).unwrap(),
            Arrow::X,
            Arrow::ring(10).unwrap(),
            Arrow::ring(8).unwrap(),
            Arrow::MISS,
        ];
        short_metric().score_pad(None, &shot, 3).unwrap()
    }

    #[test]
    fn test_cells() {
        let pad = pad();
        let cells = ScorePadFormatter::default().cells(&pad).unwrap();
        assert_eq!(cells.len(), pad.rows.len());
        assert_eq!(cells[0], vec!["1", "9 X 10", "3", "29", "2", "29"]);
        assert_eq!(cells[1], vec!["Total", "70m", "3", "29", "2", "-"]);
        assert_eq!(cells[2], vec!["2", "8 M .", "1", "8", "0", "37"]);
        assert_eq!(cells[4], vec!["Grand Total", "", "4", "37", "2", "-"]);
    }

    #[test]
    fn test_surplus_total_is_unlabeled() {
        let shot: Vec<Arrow> = (0..8).map(|_| Arrow::ring(7).unwrap()).collect();
        let pad = short_metric().score_pad(None, &shot, 3).unwrap();
        let cells = ScorePadFormatter::default().cells(&pad).unwrap();
        // end, total, end, total, surplus end, surplus total, grand total
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[5], vec!["Total", "", "2", "14", "0", "-"]);
        assert_eq!(cells[6][3], "56");
    }

    #[test]
    fn test_sorted_ends() {
        let formatter = ScorePadFormatter::default().with_sorted_ends().with_delimiter(",");
        let cells = formatter.cells(&pad()).unwrap();
        assert_eq!(cells[0][1], "X,10,9");
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        ScorePadFormatter::default().write_csv(&pad(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ",Arrows,H,S,10s,R/T");
        assert_eq!(lines[1], "1,9 X 10,3,29,2,29");
        assert_eq!(lines.len(), 6);
    }
}
