use std::path::{Component, Path, PathBuf};

/// Resolves `relative` against the directory containing `base`.
///
/// Absolute paths are returned unchanged. The joined result is cleaned
/// lexically (`.` dropped, `..` folded into the preceding component); no
/// filesystem access happens here.
pub fn resolve_relative(base: impl AsRef<Path>, relative: impl AsRef<Path>) -> PathBuf {
    let relative = relative.as_ref();
    if relative.is_absolute() {
        return relative.to_path_buf();
    }

    let joined = match base.as_ref().parent() {
        Some(dir) => dir.join(relative),
        None => relative.to_path_buf(),
    };
    clean(&joined)
}

fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_relative_path_onto_descriptor_directory() {
        assert_eq!(
            resolve_relative("/maps/a.json", "tiles/x.png"),
            PathBuf::from("/maps/tiles/x.png")
        );
    }

    #[cfg(unix)]
    #[test]
    fn keeps_absolute_path_unchanged() {
        assert_eq!(
            resolve_relative("/maps/a.json", "/abs/x.png"),
            PathBuf::from("/abs/x.png")
        );
    }

    #[test]
    fn folds_parent_components() {
        assert_eq!(
            resolve_relative("assets/maps/spawn.json", "../tilesets/./floor.json"),
            PathBuf::from("assets/tilesets/floor.json")
        );
    }

    #[test]
    fn bare_file_name_resolves_next_to_it() {
        assert_eq!(
            resolve_relative("map.json", "tileset.json"),
            PathBuf::from("tileset.json")
        );
    }

    #[test]
    fn leading_parent_components_are_kept() {
        assert_eq!(
            resolve_relative("map.json", "../shared/sheet.png"),
            PathBuf::from("../shared/sheet.png")
        );
    }
}
