use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;

use link_js::LinkGraph;
use link_js::ReferenceSite;
use link_js::RenderOptions;

#[derive(Clone, Default)]
struct SharedWriter {
  buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
  fn contents(&self) -> String {
    String::from_utf8(self.buffer.lock().unwrap().clone()).unwrap()
  }
}

struct SharedWriterGuard<'a> {
  buffer: &'a Arc<Mutex<Vec<u8>>>,
}

impl<'a> io::Write for SharedWriterGuard<'a> {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.buffer.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl<'a> MakeWriter<'a> for SharedWriter {
  type Writer = SharedWriterGuard<'a>;

  fn make_writer(&'a self) -> Self::Writer {
    SharedWriterGuard {
      buffer: &self.buffer,
    }
  }
}

#[test]
fn linking_emits_debug_events() {
  let writer = SharedWriter::default();
  let subscriber = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(tracing::Level::DEBUG)
    .with_ansi(false)
    .with_writer(writer.clone())
    .finish();
  let _guard = tracing::subscriber::set_default(subscriber);

  let mut graph = LinkGraph::new();
  let main = graph.add_module("main.js", 1);
  let lib = graph.add_module("lib.js", 0);
  let ext = graph.add_external_module("react");
  let default = graph.external_binding(ext, "default");
  graph.register_reference(default, ReferenceSite::new(main, "React"));
  let local = graph.declare_local(lib, "value");
  graph.add_export(lib, "value", local);
  let ns = graph.namespace_of(lib).unwrap();
  graph.register_reference(ns, ReferenceSite::new(main, "lib"));
  graph.include(ns);
  graph.include(default);
  graph.render_block(ns, &RenderOptions::default()).unwrap();

  drop(_guard);
  let output = writer.contents();
  for expected in [
    "created namespace binding",
    "included binding",
    "renamed external module",
    "render_namespace",
  ] {
    assert!(
      output.contains(expected),
      "expected `{expected}` in log output, got: {output}"
    );
  }
  // Reference registration is only logged at trace level.
  assert!(!output.contains("registered reference"));
}
