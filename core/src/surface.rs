use crate::view::ListItem;

/// Where the controller draws: the list container plus the entry field.
pub trait Surface {
    /// Replaces everything currently shown in the list.
    fn render_list(&mut self, items: Vec<ListItem>);
    fn clear_input(&mut self);
    /// Blocking notice the user has to acknowledge.
    fn alert(&mut self, message: &str);
    /// Non-blocking status line.
    fn notify(&mut self, message: &str);
}
