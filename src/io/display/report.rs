use std::fmt;

use crate::algorithm::analyze::{typical_vertex_ranges, DetailLevel, PrecisionLevel};
use crate::algorithm::{AnalysisReport, FeatureAnalysis, OptimizeReport, SizeReport, SizeVerdict};

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Geometry types:")?;
        for (kind, count) in &self.geometry_types {
            writeln!(f, "  {kind}: {count}")?;
        }
        writeln!(f, "Total coordinates: {}", self.total_coords)?;
        writeln!(f, "Average per geometry: {:.0}", self.average_coords)?;
        writeln!(
            f,
            "Max in single geometry: {} (#{})",
            self.max_coords, self.max_coords_idx
        )?;
        match self.min_coords {
            Some(min) => writeln!(f, "Min in single geometry: {min}")?,
            None => writeln!(f, "Min in single geometry: n/a")?,
        }

        let dominant = self.dominant_type;
        match self.detail {
            DetailLevel::OverDetailed => {
                writeln!(f, "Over-detailed geometry: simplification recommended")?;
            }
            DetailLevel::ModeratelyDetailed => {
                writeln!(
                    f,
                    "Moderately detailed geometry: simplification may reduce size by 30-50%"
                )?;
            }
            DetailLevel::Reasonable => {
                writeln!(f, "Reasonable geometry complexity")?;
            }
            DetailLevel::NotApplicable => {
                writeln!(f, "Simplification not applicable")?;
            }
        }
        if let Some((normal, complex)) = dominant.and_then(typical_vertex_ranges) {
            writeln!(
                f,
                "  typical vertices: {}-{} normal, {}-{} complex",
                normal.start(),
                normal.end(),
                complex.start(),
                complex.end()
            )?;
        }

        if let Some(precision) = &self.precision {
            writeln!(
                f,
                "Coordinate precision: ~{:.0} decimal places (sample {:?})",
                precision.decimals, precision.sample
            )?;
            match precision.level {
                PrecisionLevel::Excessive {
                    projected_reduction_pct,
                } => writeln!(
                    f,
                    "  excessive: trimming to 6 decimals saves ~{projected_reduction_pct:.0}%"
                )?,
                PrecisionLevel::High => writeln!(f, "  high: trimming to 6 decimals recommended")?,
                PrecisionLevel::Appropriate => writeln!(f, "  appropriate")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for FeatureAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.feature_count == 0 {
            return writeln!(f, "No features found");
        }
        writeln!(f, "Features: {}", self.feature_count)?;
        write!(f, "{}", self.geometry)?;
        if let Some(feature) = &self.most_complex {
            writeln!(
                f,
                "Most complex feature: {} ({} vertices)",
                feature.name, feature.coords
            )?;
        }
        writeln!(f, "Fields: {}", self.field_count)?;
        for field in &self.large_fields {
            writeln!(f, "  large text field: {} ({} chars)", field.name, field.chars)?;
        }
        Ok(())
    }
}

impl fmt::Display for OptimizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simplification tolerance: {}, coordinate precision: {} decimals",
            self.options.tolerance, self.options.precision
        )?;
        writeln!(f, "Features: {}", self.feature_count)?;
        writeln!(
            f,
            "Coordinates: {} -> {} ({:.1}% reduction)",
            self.coords_before,
            self.coords_after,
            self.coord_reduction_pct()
        )?;
        if !self.fallback_indices.is_empty() {
            writeln!(
                f,
                "Kept or dropped parts in {} features ({} lines kept, {} rings kept, {} rings dropped, {} polygons dropped)",
                self.fallback_indices.len(),
                self.diagnostics.lines_kept,
                self.diagnostics.rings_kept,
                self.diagnostics.rings_dropped,
                self.diagnostics.polygons_dropped
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "File size: {:.2} MB -> {:.2} MB ({:.1}% reduction)",
            self.input_mib(),
            self.output_mib(),
            self.reduction_pct()
        )?;
        match self.verdict() {
            SizeVerdict::Excellent => writeln!(f, "File size excellent for web use"),
            SizeVerdict::Good => writeln!(f, "File size good for web use"),
            SizeVerdict::StillLarge => {
                let suggestions = self
                    .suggested_tolerances()
                    .iter()
                    .map(|t| format!("--tolerance {t}"))
                    .collect::<Vec<_>>()
                    .join(" or ");
                writeln!(f, "File still large, try {suggestions}")
            }
        }
    }
}
