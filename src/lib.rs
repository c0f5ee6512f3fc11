#![doc = r#"
pixprep — image preparation for character-recognition datasets.

This crate batch-resizes directories of images to a fixed resolution, renders a
square grayscale image from a flat line of pixel intensities, and flattens an
image back into such a line. It powers the `pixprep` CLI and can be embedded in
your own Rust applications.

Batch resize
------------
```rust,no_run
use std::path::Path;
use pixprep::{resize_directory, OutputPolicy, ResizeParams};

fn main() -> pixprep::Result<()> {
    let params = ResizeParams {
        width: 64,
        height: 64,
        policy: OutputPolicy::InPlace,
        ..Default::default()
    };

    let report = resize_directory(Path::new("data/characters"), &params)?;
    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Files that cannot be read, decoded or written are listed in
`BatchReport::failures`; the rest of the batch still runs.

Render a pixel line
-------------------
```rust
use pixprep::{render_pixel_text, RenderParams};

fn main() -> pixprep::Result<()> {
    let img = render_pixel_text("0,1,0,1", &RenderParams::default())?;
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(1, 0).0[0], 255);
    Ok(())
}
```

Error handling
--------------
All public functions return `pixprep::Result<T>`; match on `pixprep::Error` to
handle specific cases.

```rust
use pixprep::{render_pixel_text, Error, RenderParams};

match render_pixel_text("0,1,0", &RenderParams::default()) {
    Err(Error::Shape { count }) => assert_eq!(count, 3),
    other => panic!("unexpected: {other:?}"),
}
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — resize, grid, flatten and save primitives.
- [`types`] — option enums (`OutputPolicy`, `ResampleFilter`, `RangePolicy`, `FlattenMode`).
- [`io`] — image decoding, pixel text lines and raster writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::params::{RenderParams, ResizeParams};
pub use crate::core::processing::grid::PixelGrid;
pub use error::{Error, Result};
pub use types::{FlattenMode, OutputPolicy, RangePolicy, ResampleFilter};

pub use api::{
    BatchReport, FileFailure, flatten_image_file, flatten_image_file_to_path,
    iterate_image_files, pixel_grid_from_text, render_pixel_file, render_pixel_file_to_path,
    render_pixel_text, resize_directory, resize_image_file,
};
