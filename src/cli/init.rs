//! `glint init`: write a default `glint.toml`.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::config::GlintConfig;
use crate::log;

const HEADER: &str = "\
# glint configuration
#
# Every key is optional; remove the ones you keep at their defaults.
# Set `enable = false` in a section to turn that behavior off.

";

/// The config file written by `init`: every default, spelled out.
pub fn config_template() -> Result<String> {
    Ok(format!("{HEADER}{}", GlintConfig::default().to_toml()?))
}

/// Write the template to `dir/config_name`, refusing to overwrite.
///
/// With `dry`, print the template to stdout instead.
pub fn init_config(dir: Option<&Path>, config_name: &Path, dry: bool) -> Result<()> {
    let template = config_template()?;
    if dry {
        print!("{template}");
        return Ok(());
    }

    let dir = dir.unwrap_or(Path::new("."));
    let path = dir.join(config_name);
    if path.exists() {
        bail!("`{}` already exists", path.display());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory `{}`", dir.display()))?;
    fs::write(&path, template).with_context(|| format!("failed to write `{}`", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("site");
        init_config(Some(&target), Path::new("glint.toml"), false).unwrap();

        let path = target.join("glint.toml");
        let config = GlintConfig::from_path(&path).unwrap();
        assert_eq!(config.nav.container, "#site-nav");
        assert_eq!(config.counter.duration, 1000.0);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glint.toml");
        fs::write(&path, "[header]\nthreshold = 20.0\n").unwrap();

        let err = init_config(Some(dir.path()), Path::new("glint.toml"), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[header]\nthreshold = 20.0\n"
        );
    }

    #[test]
    fn test_template_has_every_section() {
        let template = config_template().unwrap();
        for section in [
            "[anchor]",
            "[header]",
            "[nav]",
            "[spy]",
            "[reveal]",
            "[counter]",
            "[parallax]",
            "[backdrop]",
        ] {
            assert!(template.contains(section), "missing {section}");
        }
    }
}
