//! The conversion pipeline: load, scale, tessellate, write, verify.

use std::any::Any;
use std::fs::File;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use log::{debug, info};

use crate::error::{ConvertError, Result, Status};
use crate::kernel::Kernel;
use crate::last_error;
use crate::options::ConversionOptions;
use crate::utf8::validate_paths;

/// Runs conversions against one kernel backend.
///
/// Every entry point clears the calling thread's last-error slot first and
/// records the diagnostic of any failure before returning. No failure,
/// including a panic inside the kernel, escapes as anything but an error
/// value.
#[derive(Debug, Clone, Default)]
pub struct Converter<K> {
    kernel: K,
}

impl<K: Kernel> Converter<K> {
    /// Create a converter over `kernel`.
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }

    /// The kernel backend.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Convert the STEP file at `input` into an STL file at `output`.
    pub fn convert(&self, input: &str, output: &str, options: &ConversionOptions) -> Result<()> {
        self.convert_bytes(
            Some(input.as_bytes()),
            Some(output.as_bytes()),
            Some(options),
        )
    }

    /// Boundary form of [`Converter::convert`].
    ///
    /// Paths are raw bytes that must be UTF-8; `None` stands for a null
    /// pointer. `None` options means the defaults.
    pub fn convert_bytes(
        &self,
        input: Option<&[u8]>,
        output: Option<&[u8]>,
        options: Option<&ConversionOptions>,
    ) -> Result<()> {
        last_error::clear();
        let options = options.copied().unwrap_or_default();
        let result = self.checked(input, output, &options);
        if let Err(e) = &result {
            debug!("conversion failed ({}): {e}", e.status().as_i32());
            last_error::set(&e.to_string());
        }
        result
    }

    /// [`Converter::convert_bytes`] reduced to its status code.
    pub fn convert_status(
        &self,
        input: Option<&[u8]>,
        output: Option<&[u8]>,
        options: Option<&ConversionOptions>,
    ) -> Status {
        match self.convert_bytes(input, output, options) {
            Ok(()) => Status::Ok,
            Err(e) => e.status(),
        }
    }

    fn checked(
        &self,
        input: Option<&[u8]>,
        output: Option<&[u8]>,
        options: &ConversionOptions,
    ) -> Result<()> {
        let (input, output) = validate_paths(input, output)?;
        options.validate()?;

        let run = || self.run(Path::new(input), Path::new(output), options);
        match panic::catch_unwind(AssertUnwindSafe(run)) {
            Ok(result) => result,
            Err(payload) => Err(ConvertError::Unknown(panic_message(payload.as_ref()))),
        }
    }

    fn run(&self, input: &Path, output: &Path, options: &ConversionOptions) -> Result<()> {
        debug!("loading {}", input.display());
        let mut shape = self.kernel.load(input)?;

        // Skipped outright at 1.0 so the kernel never sees an identity transform.
        if options.needs_scale() {
            debug!("scaling by {}", options.scale);
            shape = self.kernel.scale(shape, options.scale)?;
        }

        let params = options.mesh_params();
        debug!(
            "tessellating: linear={} angular={:.6}rad relative={} parallel={}",
            params.linear_deflection, params.angular_deflection, params.relative, params.parallel
        );
        let mesh = self.kernel.tessellate(shape, &params)?;

        let format = options.stl_format();
        debug!("writing {:?} STL to {}", format, output.display());
        self.kernel.write_stl(&mesh, output, format)?;

        // The writer can report success without producing anything.
        File::open(output).map_err(|e| ConvertError::OutputMissing(e.to_string()))?;

        info!("converted {} -> {}", input.display(), output.display());
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
