//! Response sinks.
//!
//! A [`ResponseSink`] receives rendered output and, when a template fails at
//! runtime, an out-of-band failure status. It is shaped after an HTTP response
//! writer; [`http::Response<Vec<u8>>`] implements it directly:
//!
//! ```rust,ignore
//! let mut response = http::Response::new(Vec::new());
//! renderer.render_to(&mut response, "home.page.jinja", Some(&data))?;
//! assert_eq!(response.status(), http::StatusCode::OK);
//! ```

use std::io;

use http::header::{HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{Response, StatusCode};

/// Destination for rendered page output.
pub trait ResponseSink {
    /// Appends a chunk of body output.
    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()>;

    /// Reports a failure with the given status and message.
    fn write_error(&mut self, status: StatusCode, message: &str);
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).write_body(chunk)
    }

    fn write_error(&mut self, status: StatusCode, message: &str) {
        (**self).write_error(status, message)
    }
}

impl ResponseSink for Response<Vec<u8>> {
    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.body_mut().extend_from_slice(chunk);
        Ok(())
    }

    /// Replaces the response with a plain-text error page.
    fn write_error(&mut self, status: StatusCode, message: &str) {
        *self.status_mut() = status;

        let headers = self.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));

        let body = self.body_mut();
        body.clear();
        body.extend_from_slice(message.as_bytes());
        body.push(b'\n');
    }
}

/// Adapts a sink to [`io::Write`] so engines can stream into it.
pub(crate) struct SinkWriter<'a> {
    sink: &'a mut dyn ResponseSink,
}

impl<'a> SinkWriter<'a> {
    pub(crate) fn new(sink: &'a mut dyn ResponseSink) -> Self {
        Self { sink }
    }
}

impl io::Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write_body(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
