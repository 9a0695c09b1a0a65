//! Span field capture for instrumentation tests.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Records every field value set when a span is created.
#[derive(Clone, Default)]
pub(crate) struct SpanFields(Arc<Mutex<Vec<(String, String)>>>);

impl SpanFields {
    /// Run `f` with this layer installed and return what it recorded.
    pub(crate) fn capture<T>(f: impl FnOnce() -> T) -> Vec<(String, String)> {
        let fields = SpanFields::default();
        let subscriber = tracing_subscriber::registry().with(fields.clone());
        tracing::subscriber::with_default(subscriber, f);
        fields.0.lock().expect("lock").clone()
    }
}

impl Visit for SpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0
            .lock()
            .expect("lock")
            .push((field.name().to_string(), format!("{value:?}")));
    }
}

impl<S: Subscriber> Layer<S> for SpanFields {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        attrs.record(&mut self.clone());
    }
}
