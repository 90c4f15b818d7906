//! Camera configuration widgets
//!
//! The configuration of a camera is a tree of widgets: windows and sections
//! group the actual settings, which are typed (text, menus, toggles, ...).

use crate::{
  helper::{chars_to_string, to_c_string, uninit},
  try_gp_internal, Error, Result,
};
use libgphoto2_sys::CameraWidgetType;
use std::{
  fmt,
  ops::Range,
  os::raw::{c_char, c_int, c_void},
};

/// Type of a configuration widget
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum WidgetKind {
  /// Top level window
  Window,
  /// Section grouping other widgets
  Section,
  /// Free text
  Text,
  /// Number in a range
  Range,
  /// On/off
  Toggle,
  /// Choice, shown as radio buttons
  Radio,
  /// Choice, shown as a dropdown menu
  Menu,
  /// Triggers an action on the camera
  Button,
  /// Date and time
  Date,
}

impl WidgetKind {
  /// Whether the value of the widget is a string
  pub fn has_text_value(self) -> bool {
    matches!(self, WidgetKind::Text | WidgetKind::Radio | WidgetKind::Menu)
  }
}

impl From<CameraWidgetType> for WidgetKind {
  fn from(ty: CameraWidgetType) -> Self {
    match ty {
      CameraWidgetType::GP_WIDGET_WINDOW => WidgetKind::Window,
      CameraWidgetType::GP_WIDGET_SECTION => WidgetKind::Section,
      CameraWidgetType::GP_WIDGET_TEXT => WidgetKind::Text,
      CameraWidgetType::GP_WIDGET_RANGE => WidgetKind::Range,
      CameraWidgetType::GP_WIDGET_TOGGLE => WidgetKind::Toggle,
      CameraWidgetType::GP_WIDGET_RADIO => WidgetKind::Radio,
      CameraWidgetType::GP_WIDGET_MENU => WidgetKind::Menu,
      CameraWidgetType::GP_WIDGET_BUTTON => WidgetKind::Button,
      CameraWidgetType::GP_WIDGET_DATE => WidgetKind::Date,
    }
  }
}

/// Value of a widget as it is printed in the configuration tree
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum DisplayValue {
  /// Value of a text, radio or menu widget
  Text(String),
  /// The widget does not hold a string value
  Unsupported,
  /// Reading the value failed
  Unreadable,
}

impl fmt::Display for DisplayValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DisplayValue::Text(text) => f.write_str(text),
      DisplayValue::Unsupported => f.write_str("?"),
      DisplayValue::Unreadable => f.write_str("??"),
    }
  }
}

/// Configuration widget
///
/// Holds a reference on the underlying libgphoto2 widget. Freeing a tree
/// frees all of its children regardless of their reference count, so every
/// child also holds a reference on the root of its tree.
pub struct Widget {
  pub(crate) inner: *mut libgphoto2_sys::CameraWidget,
  root: Option<Box<Widget>>,
}

impl Clone for Widget {
  fn clone(&self) -> Self {
    unsafe {
      libgphoto2_sys::gp_widget_ref(self.inner);
    }

    Self { inner: self.inner, root: self.root.clone() }
  }
}

impl Drop for Widget {
  fn drop(&mut self) {
    unsafe {
      libgphoto2_sys::gp_widget_unref(self.inner);
    }
  }
}

impl Widget {
  /// Takes ownership of a widget returned by libgphoto2 with a reference count of one
  pub(crate) fn new_owned(inner: *mut libgphoto2_sys::CameraWidget) -> Self {
    Self { inner, root: None }
  }

  /// Wraps a descendant of `self`, keeping the tree's root alive
  fn new_shared(&self, inner: *mut libgphoto2_sys::CameraWidget) -> Self {
    unsafe {
      libgphoto2_sys::gp_widget_ref(inner);
    }

    let root = match &self.root {
      Some(root) => root.clone(),
      None => Box::new(self.clone()),
    };

    Self { inner, root: Some(root) }
  }

  /// Get the widget type
  pub fn kind(&self) -> Result<WidgetKind> {
    let mut ty = unsafe { uninit() };
    try_gp_internal!(libgphoto2_sys::gp_widget_get_type(self.inner, &mut ty))?;

    Ok(ty.into())
  }

  /// Get the widget name
  pub fn name(&self) -> Result<String> {
    let mut name = unsafe { uninit() };
    try_gp_internal!(libgphoto2_sys::gp_widget_get_name(self.inner, &mut name))?;

    Ok(chars_to_string(name))
  }

  /// Get the widget label
  pub fn label(&self) -> Result<String> {
    let mut label = unsafe { uninit() };
    try_gp_internal!(libgphoto2_sys::gp_widget_get_label(self.inner, &mut label))?;

    Ok(chars_to_string(label))
  }

  /// Get the widget id
  pub fn id(&self) -> Result<i32> {
    let mut id = 0;
    try_gp_internal!(libgphoto2_sys::gp_widget_get_id(self.inner, &mut id))?;

    Ok(id)
  }

  /// If true, the widget cannot be written
  pub fn readonly(&self) -> Result<bool> {
    let mut readonly = 0;
    try_gp_internal!(libgphoto2_sys::gp_widget_get_readonly(self.inner, &mut readonly))?;

    Ok(readonly == 1)
  }

  /// String value of a text, radio or menu widget
  pub fn text(&self) -> Result<String> {
    self.expect_text_value()?;

    let mut value: *const c_char = std::ptr::null();
    try_gp_internal!(libgphoto2_sys::gp_widget_get_value(
      self.inner,
      (&mut value as *mut *const c_char).cast::<c_void>()
    ))?;

    Ok(chars_to_string(value))
  }

  /// Set the string value of a text, radio or menu widget
  ///
  /// The change only reaches the camera once the widget is written back with
  /// [`Camera::set_config`](crate::Camera::set_config).
  pub fn set_text(&self, value: &str) -> Result<()> {
    self.expect_text_value()?;

    let value = to_c_string!(value);
    try_gp_internal!(libgphoto2_sys::gp_widget_set_value(
      self.inner,
      value.as_ptr().cast::<c_void>()
    ))?;

    Ok(())
  }

  /// Value printed in the configuration tree
  pub fn display_value(&self) -> DisplayValue {
    match self.kind() {
      Ok(kind) if kind.has_text_value() => {}
      Ok(_) => return DisplayValue::Unsupported,
      Err(err) => {
        tracing::warn!(code = err.code(), "widget get type failed: {}", err);
        return DisplayValue::Unsupported;
      }
    }

    match self.text() {
      Ok(text) => DisplayValue::Text(text),
      Err(_) => DisplayValue::Unreadable,
    }
  }

  fn expect_text_value(&self) -> Result<()> {
    let kind = self.kind()?;

    if kind.has_text_value() {
      Ok(())
    } else {
      Err(Error::with_info(
        libgphoto2_sys::GP_ERROR_BAD_PARAMETERS,
        format!("widget has bad type {:?}", kind),
      ))
    }
  }

  /// Counts the children of the widget
  pub fn children_count(&self) -> Result<usize> {
    let count = try_gp_internal!(libgphoto2_sys::gp_widget_count_children(self.inner))?;

    Ok(count as usize)
  }

  /// Gets a child by its index
  pub fn child(&self, index: usize) -> Result<Widget> {
    let mut child = unsafe { uninit() };
    try_gp_internal!(libgphoto2_sys::gp_widget_get_child(self.inner, index as c_int, &mut child))?;

    Ok(self.new_shared(child))
  }

  /// Iterate over the children, yielding each child or the error fetching it
  pub fn children(&self) -> Result<Children<'_>> {
    Ok(Children { parent: self, range: 0..self.children_count()? })
  }

  /// Get a descendant by its name
  pub fn child_by_name(&self, name: &str) -> Result<Widget> {
    let name = to_c_string!(name);
    let mut child = unsafe { uninit() };
    try_gp_internal!(libgphoto2_sys::gp_widget_get_child_by_name(
      self.inner,
      name.as_ptr(),
      &mut child
    ))?;

    Ok(self.new_shared(child))
  }

  /// Get a descendant by its label
  pub fn child_by_label(&self, label: &str) -> Result<Widget> {
    let label = to_c_string!(label);
    let mut child = unsafe { uninit() };
    try_gp_internal!(libgphoto2_sys::gp_widget_get_child_by_label(
      self.inner,
      label.as_ptr(),
      &mut child
    ))?;

    Ok(self.new_shared(child))
  }
}

impl fmt::Debug for Widget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Widget")
      .field("id", &self.id())
      .field("name", &self.name())
      .field("label", &self.label())
      .field("kind", &self.kind())
      .field("value", &self.display_value())
      .finish()
  }
}

/// Iterator over the children of a widget
pub struct Children<'a> {
  parent: &'a Widget,
  range: Range<usize>,
}

impl Iterator for Children<'_> {
  type Item = (usize, Result<Widget>);

  fn next(&mut self) -> Option<Self::Item> {
    self.range.next().map(|i| (i, self.parent.child(i)))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.range.size_hint()
  }
}
