use std::fs;
use std::path::{Path, PathBuf};

fn pdfium_library_name() -> &'static str {
    match std::env::var("CARGO_CFG_TARGET_OS").as_deref() {
        Ok("windows") => "pdfium.dll",
        Ok("macos") => "libpdfium.dylib",
        _ => "libpdfium.so",
    }
}

fn target_dir(out_dir: &Path) -> Option<PathBuf> {
    out_dir
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
}

fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(workspace_root) = manifest_dir.parent().and_then(Path::parent) else {
        return;
    };

    let library_name = pdfium_library_name();
    let vendor_library = workspace_root
        .join("vendor")
        .join("pdfium")
        .join(library_name);

    println!("cargo:rerun-if-changed={}", vendor_library.display());

    if !vendor_library.exists() {
        println!(
            "cargo:warning={} not found at {}; PDFium will be looked up at runtime",
            library_name,
            vendor_library.display()
        );
        return;
    }

    let Some(target_dir) = std::env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .and_then(|out| target_dir(&out))
    else {
        return;
    };

    let dest = target_dir.join(library_name);
    match fs::copy(&vendor_library, &dest) {
        Ok(_) => println!(
            "cargo:warning=Copied {} from vendor to {}",
            library_name,
            dest.display()
        ),
        Err(e) => println!("cargo:warning=Failed to copy {}: {}", library_name, e),
    }
}
