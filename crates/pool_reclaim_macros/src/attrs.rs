//! `#[reclaim(...)]` attribute parsing.

use syn::{Attribute, Path};

/// How the struct classifies when nested inside another value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Opaque,
    Handle,
    Tuple,
}

/// Struct-level options.
pub struct ContainerAttrs {
    pub mode: Mode,
    pub static_members: Option<Path>,
}

/// Field-level options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    Slot,
    Skip,
    Flatten,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut mode = Mode::Opaque;
        let mut static_members = None;

        for attr in attrs.iter().filter(|a| a.path().is_ident("reclaim")) {
            attr.parse_nested_meta(|meta| {
                let requested = if meta.path.is_ident("handle") {
                    Mode::Handle
                } else if meta.path.is_ident("tuple") {
                    Mode::Tuple
                } else if meta.path.is_ident("static_members") {
                    if static_members.is_some() {
                        return Err(meta.error("duplicate `static_members`"));
                    }
                    static_members = Some(meta.value()?.parse::<Path>()?);
                    return Ok(());
                } else {
                    return Err(meta.error(format!(
                        "unknown reclaim attribute: `{}`",
                        path_name(&meta.path)
                    )));
                };

                if mode != Mode::Opaque {
                    return Err(meta.error("`handle` and `tuple` are mutually exclusive"));
                }
                mode = requested;
                Ok(())
            })?;
        }

        Ok(Self {
            mode,
            static_members,
        })
    }
}

/// Parse the field's `#[reclaim(...)]` options.
pub fn field_mode(attrs: &[Attribute]) -> syn::Result<FieldMode> {
    let mut mode = FieldMode::Slot;

    for attr in attrs.iter().filter(|a| a.path().is_ident("reclaim")) {
        attr.parse_nested_meta(|meta| {
            let requested = if meta.path.is_ident("skip") {
                FieldMode::Skip
            } else if meta.path.is_ident("flatten") {
                FieldMode::Flatten
            } else {
                return Err(meta.error(format!(
                    "unknown reclaim field attribute: `{}`",
                    path_name(&meta.path)
                )));
            };

            if mode != FieldMode::Slot {
                return Err(meta.error("`skip` and `flatten` are mutually exclusive"));
            }
            mode = requested;
            Ok(())
        })?;
    }

    Ok(mode)
}

fn path_name(path: &Path) -> String {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}
