use crate::{FieldId, FieldSpec, SectionSchema};

/// The aggregate presented to a renderer: ordered sections plus edit mode.
///
/// A form instance is presentation-agnostic. It can be rendered as a single
/// scrolling form or as one step per section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInstance {
    sections: Vec<SectionSchema>,

    /// Editing an existing profile rather than registering a new one.
    is_edit_mode: bool,
}

impl FormInstance {
    /// Create a registration-mode form from already ordered sections.
    pub fn new(sections: Vec<SectionSchema>) -> Self {
        Self {
            sections,
            is_edit_mode: false,
        }
    }

    pub fn with_edit_mode(mut self, is_edit_mode: bool) -> Self {
        self.is_edit_mode = is_edit_mode;
        self
    }

    pub fn is_edit_mode(&self) -> bool {
        self.is_edit_mode
    }

    pub fn sections(&self) -> &[SectionSchema] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&SectionSchema> {
        self.sections.get(index)
    }

    /// Swap in a rebuilt section, returning the old one.
    pub fn replace_section(
        &mut self,
        index: usize,
        section: SectionSchema,
    ) -> Option<SectionSchema> {
        self.sections
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, section))
    }

    /// Whether the section at `index` shows its title.
    pub fn shows_header(&self, index: usize) -> bool {
        self.section(index)
            .is_some_and(|section| section.shows_header(self.is_edit_mode))
    }

    /// All field ids in form order.
    pub fn field_ids(&self) -> impl Iterator<Item = &FieldId> {
        self.sections
            .iter()
            .flat_map(|section| section.ordered_field_ids())
    }

    /// Find a field and the index of its section.
    ///
    /// If the id occurs in more than one section the first one wins.
    pub fn find_field(&self, id: &str) -> Option<(usize, &FieldSpec)> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(index, section)| section.field(id).map(|field| (index, field)))
    }

    /// Check if the form has any sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }
}
