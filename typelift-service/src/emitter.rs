//! Code emitter seam for resolved descriptors
//!
//! Physical materialization of type definitions is delegated to the
//! surrounding application; the pipeline only hands over an ordered
//! descriptor sequence. Two reference backends ship here: a recording
//! emitter for tests and a plain source-text sketch.

use typelift_core::{Result, TypeDescriptor, TypeParent};

/// Consumer of a resolved, parents-before-children descriptor sequence
pub trait DescriptorEmitter {
    /// Materialize the descriptor sequence
    ///
    /// # Errors
    ///
    /// Implementations writing to external sinks may fail.
    fn emit(&mut self, descriptors: &[TypeDescriptor]) -> Result<()>;
}

/// Emitter that captures descriptors for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingEmitter {
    /// Every descriptor received, in emission order
    pub emitted: Vec<TypeDescriptor>,
}

impl RecordingEmitter {
    /// Create an empty recording emitter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DescriptorEmitter for RecordingEmitter {
    fn emit(&mut self, descriptors: &[TypeDescriptor]) -> Result<()> {
        self.emitted.extend_from_slice(descriptors);
        Ok(())
    }
}

/// Emitter that renders a neutral source-text sketch of the hierarchy
#[derive(Debug, Clone, Default)]
pub struct SourceTextEmitter {
    output: String,
}

impl SourceTextEmitter {
    /// Create an emitter with an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered source text
    #[must_use]
    pub fn source(&self) -> &str {
        &self.output
    }
}

impl DescriptorEmitter for SourceTextEmitter {
    fn emit(&mut self, descriptors: &[TypeDescriptor]) -> Result<()> {
        for descriptor in descriptors {
            if !self.output.is_empty() {
                self.output.push('\n');
            }
            match &descriptor.parent {
                Some(TypeParent::Class(parent)) => {
                    self.output
                        .push_str(&format!("type {} extends {} {{\n", descriptor.name, parent));
                }
                Some(TypeParent::Marker(marker)) => {
                    self.output.push_str(&format!(
                        "type {} implements {} {{\n",
                        descriptor.name, marker
                    ));
                }
                None => {
                    self.output.push_str(&format!("type {} {{\n", descriptor.name));
                }
            }
            for field in &descriptor.own_fields {
                self.output.push_str(&format!("    {field};\n"));
            }
            self.output.push_str("}\n");
        }
        Ok(())
    }
}
