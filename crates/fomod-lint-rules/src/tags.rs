//! Tag and attribute names of the installer configuration grammar.

/// Root element.
pub const CONFIG: &str = "config";
/// Installer display name.
pub const MODULE_NAME: &str = "moduleName";
/// Installer header image.
pub const MODULE_IMAGE: &str = "moduleImage";
/// Installer-wide dependencies block.
pub const MODULE_DEPENDENCIES: &str = "moduleDependencies";
/// Files installed unconditionally.
pub const REQUIRED_INSTALL_FILES: &str = "requiredInstallFiles";
/// Interactive install steps.
pub const INSTALL_STEPS: &str = "installSteps";
/// Files installed when flag patterns match.
pub const CONDITIONAL_FILE_INSTALLS: &str = "conditionalFileInstalls";
/// Folder copy instruction.
pub const FOLDER: &str = "folder";
/// File copy instruction.
pub const FILE: &str = "file";
/// Plugin image.
pub const IMAGE: &str = "image";
/// Flag definition (`<flag name="X">value</flag>`).
pub const FLAG: &str = "flag";
/// Flag precondition (`<flagDependency flag="X" value="Y"/>`).
pub const FLAG_DEPENDENCY: &str = "flagDependency";

/// Tags that should appear at most once per configuration.
pub const SINGLETONS: &[&str] = &[
    MODULE_NAME,
    MODULE_IMAGE,
    MODULE_DEPENDENCIES,
    REQUIRED_INSTALL_FILES,
    INSTALL_STEPS,
    CONDITIONAL_FILE_INSTALLS,
];

/// Top-level blocks that make an installer do something.
pub const ACTION_BLOCKS: &[&str] = &[
    MODULE_DEPENDENCIES,
    REQUIRED_INSTALL_FILES,
    INSTALL_STEPS,
    CONDITIONAL_FILE_INSTALLS,
];

/// Package-relative source path of `file` and `folder`.
pub const ATTR_SOURCE: &str = "source";
/// Package-relative image path of `moduleImage` and `image`.
pub const ATTR_PATH: &str = "path";
/// Flag name on `flag` elements.
pub const ATTR_NAME: &str = "name";
/// Flag name on `flagDependency` elements.
pub const ATTR_FLAG: &str = "flag";
/// Required flag value on `flagDependency` elements.
pub const ATTR_VALUE: &str = "value";
