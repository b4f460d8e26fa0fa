//! Span exporter writing OTLP/JSON lines to a rotating file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;

use super::otlp_json;
use super::rotating_file::{RotatingFile, RotationPolicy};

/// Writes each exported batch as one line of OTLP/JSON.
#[derive(Debug)]
pub struct OtlpFileExporter {
    file: RotatingFile,
    resource: Resource,
    stopped: AtomicBool,
}

impl OtlpFileExporter {
    pub fn new(path: PathBuf, policy: RotationPolicy, resource: Resource) -> Self {
        Self {
            file: RotatingFile::new(path, policy),
            resource,
            stopped: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped.load(Ordering::Acquire) {
            return Err(TraceError::from("trace exporter already shut down"));
        }
        if batch.is_empty() {
            return Ok(());
        }

        let line = otlp_json::encode_batch(&self.resource, batch).to_string();
        self.file
            .append_line(&line)
            .map_err(|err| TraceError::from(err.to_string()))
    }
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::Release);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider that exports every finished span synchronously
/// to `path`.
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter::new(path, RotationPolicy::default(), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::{file_tracer_provider, OtlpFileExporter};
    use crate::observability::RotationPolicy;
    use futures_util::FutureExt;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::export::trace::SpanExporter;
    use opentelemetry_sdk::resource::Resource;

    fn resource() -> Resource {
        Resource::new(vec![KeyValue::new("service.name", "launcher-search")])
    }

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.json");
        let provider = file_tracer_provider(path.clone(), resource());

        provider.tracer("test").in_span("rank", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let doc: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"], "rank");
    }

    #[test]
    fn export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = OtlpFileExporter::new(
            dir.path().join("spans.json"),
            RotationPolicy::default(),
            resource(),
        );

        assert!(matches!(exporter.export(Vec::new()).now_or_never(), Some(Ok(()))));
        exporter.shutdown();
        assert!(matches!(exporter.export(Vec::new()).now_or_never(), Some(Err(_))));
    }
}
