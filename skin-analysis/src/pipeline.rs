//! End-to-end analysis: decode, normalize, sample, aggregate, classify

use crate::classifier::classify;
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::features::{aggregate, DerivedFeatures};
use crate::report::AnalysisReport;
use crate::sampler::{sample_face, FaceSamples};
use crate::working_size::{resize_to_working, ResampleFilter, WorkingSize};
use image::{DynamicImage, RgbImage};
use log::{debug, warn};
use serde::Serialize;

/// Everything computed for one image, for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub working_size: WorkingSize,
    pub samples: FaceSamples,
    pub features: DerivedFeatures,
    pub report: AnalysisReport,
}

/// Decode any supported encoded image into 8-bit RGB
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, AnalysisError> {
    let decoded = image::load_from_memory(bytes).map_err(|err| {
        warn!("Failed to decode {} byte payload: {err}", bytes.len());
        AnalysisError::from(err)
    })?;
    Ok(decoded.to_rgb8())
}

/// Stateless analyzer; holds only the resampling choice.
///
/// Calls share nothing, so one analyzer can be used from many threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkinAnalyzer {
    filter: ResampleFilter,
}

impl SkinAnalyzer {
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.resample)
    }

    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }

    /// Analyze an optional upload payload.
    ///
    /// An absent or empty payload is [`AnalysisError::MissingInput`].
    pub fn analyze_upload(&self, payload: Option<&[u8]>) -> Result<AnalysisReport, AnalysisError> {
        self.inspect_upload(payload).map(|analysis| analysis.report)
    }

    /// Decode an encoded image (JPEG, PNG, WebP, ...) and analyze it
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisReport, AnalysisError> {
        Ok(self.analyze_rgb(&decode_rgb(bytes)?))
    }

    /// Like [`Self::analyze_upload`] but keeps the intermediate results
    pub fn inspect_upload(&self, payload: Option<&[u8]>) -> Result<Analysis, AnalysisError> {
        match payload {
            Some(bytes) if !bytes.is_empty() => Ok(self.inspect(&decode_rgb(bytes)?)),
            _ => Err(AnalysisError::MissingInput),
        }
    }

    pub fn analyze_image(&self, image: &DynamicImage) -> AnalysisReport {
        self.analyze_rgb(&image.to_rgb8())
    }

    pub fn analyze_rgb(&self, image: &RgbImage) -> AnalysisReport {
        self.inspect(image).report
    }

    /// Run the full pipeline and keep the intermediate results
    pub fn inspect(&self, image: &RgbImage) -> Analysis {
        let working = resize_to_working(image, self.filter);
        let working_size = WorkingSize {
            width: working.width(),
            height: working.height(),
        };
        debug!(
            "Source {}x{} normalized to {working_size} with {} filter",
            image.width(),
            image.height(),
            self.filter
        );

        let samples = sample_face(&working);
        let features = aggregate(&samples);
        let report = classify(&samples, &features);

        Analysis {
            working_size,
            samples,
            features,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::labels::SkinType;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    fn encode_png(image: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_missing_payloads() {
        let analyzer = SkinAnalyzer::default();
        let err = analyzer.analyze_upload(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);

        let err = analyzer.analyze_upload(Some(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
    }

    #[test]
    fn test_garbage_payload_is_decode_failure() {
        let analyzer = SkinAnalyzer::default();
        let err = analyzer
            .analyze_upload(Some(b"definitely not an image"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
        assert_eq!(err.to_response().error, "failed to analyze");
    }

    #[test]
    fn test_png_roundtrip_matches_direct_analysis() {
        let image = RgbImage::from_pixel(512, 512, Rgb([128, 128, 128]));
        let analyzer = SkinAnalyzer::default();

        let from_bytes = analyzer.analyze_upload(Some(&encode_png(&image))).unwrap();
        assert_eq!(from_bytes, analyzer.analyze_rgb(&image));
        assert_eq!(from_bytes.skin_type, SkinType::Normal);
    }

    #[test]
    fn test_inspect_reports_working_size() {
        let image = RgbImage::from_pixel(1024, 256, Rgb([90, 90, 90]));
        let analysis = SkinAnalyzer::new(ResampleFilter::Nearest).inspect(&image);
        assert_eq!(analysis.working_size, WorkingSize { width: 512, height: 256 });
        assert_eq!(analysis.features, aggregate(&analysis.samples));
    }

    #[test]
    fn test_inspect_upload_keeps_intermediates() {
        let image = RgbImage::from_pixel(512, 300, Rgb([128, 128, 128]));
        let analysis = SkinAnalyzer::default()
            .inspect_upload(Some(&encode_png(&image)))
            .unwrap();
        assert_eq!(analysis.working_size, WorkingSize { width: 512, height: 300 });
        assert_eq!(analysis.samples.nose.texture, 0.0);

        let err = SkinAnalyzer::default().inspect_upload(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
    }

    #[test]
    fn test_from_config_uses_filter() {
        let config = AnalyzerConfig {
            resample: ResampleFilter::Lanczos3,
            ..AnalyzerConfig::default()
        };
        assert_eq!(
            SkinAnalyzer::from_config(&config).filter(),
            ResampleFilter::Lanczos3
        );
    }
}
