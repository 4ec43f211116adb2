use derive_more::{Display, Error, From};
use log::{debug, info, warn};
use crate::modules::edit::{DismissSignal, EditSession, FormKind};
use crate::modules::image::{ImageError, load_image};
use crate::modules::presenter::{NullPresenter, Presenter};
use crate::modules::render::{ViewModel, render};
use crate::modules::types::{Entry, EntryFields, EntryId, ImageData, Submission};
use crate::modules::validation::{Field, FieldErrors, validate_field, validate_form};

#[derive(Debug, Display, Error, From)]
pub enum SubmitError {
    #[display("invalid submission: {_0}")]
    Invalid(FieldErrors),
    #[display("{_0}")]
    Image(ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(EntryId),
    /// The edited entry no longer exists; nothing changed.
    Stale(EntryId),
    /// No edit session was open.
    Idle,
}

/// Owns the entries of one session together with the id counter and the
/// edit surface. Every change is pushed to the presenter.
#[derive(Debug)]
pub struct ListManager<P: Presenter = NullPresenter> {
    entries: Vec<Entry>,
    next_id: u64,
    view: ViewModel,
    add_errors: FieldErrors,
    session: EditSession,
    presenter: P,
}

impl Default for ListManager<NullPresenter> {
    fn default() -> Self {
        Self::new(NullPresenter)
    }
}

impl<P: Presenter> ListManager<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            view: ViewModel::default(),
            add_errors: FieldErrors::default(),
            session: EditSession::Idle,
            presenter,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// The projection pushed by the last render.
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn add_errors(&self) -> &FieldErrors {
        &self.add_errors
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn render(&mut self) -> &ViewModel {
        self.view = render(&self.entries);
        self.presenter.render_lists(&self.view);
        &self.view
    }

    fn append(&mut self, fields: EntryFields, image: Option<ImageData>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        info!("Added {id}: {fields}");
        self.entries.push(Entry { id, fields, image });
        self.render();
        id
    }

    pub fn create(&mut self, fields: EntryFields) -> EntryId {
        self.append(fields, None)
    }

    pub fn create_with_image(&mut self, fields: EntryFields, image: ImageData) -> EntryId {
        self.append(fields, Some(image))
    }

    /// Validates the add form and stores the entry.
    ///
    /// With an image attached the entry is appended only once the file has
    /// been read. A failed read, or dropping the future before it resolves,
    /// leaves the collection and the id counter untouched.
    pub async fn submit_add(&mut self, submission: &Submission) -> Result<EntryId, SubmitError> {
        let fields = match validate_form(submission) {
            Ok(fields) => fields,
            Err(errors) => {
                debug!("Add form rejected: {errors}");
                self.add_errors = errors.clone();
                self.presenter.show_field_errors(FormKind::Add, &self.add_errors);
                return Err(errors.into());
            }
        };

        let id = match &submission.image {
            Some(path) => {
                let image = load_image(path).await?;
                self.create_with_image(fields, image)
            }
            None => self.create(fields),
        };

        self.add_errors.clear_all();
        self.presenter.show_field_errors(FormKind::Add, &self.add_errors);
        Ok(id)
    }

    /// Replaces everything but the id. The edit form carries no image, so an
    /// updated entry has none. Unknown ids are ignored without rendering.
    pub fn update(&mut self, id: EntryId, fields: EntryFields) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            warn!("Ignoring update of unknown entry {id}");
            return false;
        };
        info!("Updated {id}: {fields}");
        *entry = Entry { id, fields, image: None };
        self.render();
        true
    }

    pub fn open_edit(&mut self, id: EntryId) -> bool {
        let Some(entry) = self.entries.iter().find(|entry| entry.id == id) else {
            warn!("Cannot edit unknown entry {id}");
            return false;
        };
        self.session.open(entry);
        debug!("Editing {id}");
        self.presenter.set_edit_surface(self.session.form());
        true
    }

    /// Returns `false` when there was nothing to close.
    pub fn close_edit(&mut self, signal: DismissSignal) -> bool {
        if !self.session.is_active() {
            return false;
        }
        debug!("Edit surface dismissed by {signal}");
        self.session.close();
        self.presenter.set_edit_surface(None);
        true
    }

    pub fn submit_edit(&mut self, submission: &Submission) -> Result<EditOutcome, FieldErrors> {
        let Some(id) = self.session.editing() else {
            return Ok(EditOutcome::Idle);
        };

        let fields = match validate_form(submission) {
            Ok(fields) => fields,
            Err(errors) => {
                debug!("Edit of {id} rejected: {errors}");
                if let Some(form) = self.session.form_mut() {
                    form.values = submission.clone();
                    form.errors = errors.clone();
                }
                self.presenter.show_field_errors(FormKind::Edit, &errors);
                return Err(errors);
            }
        };

        let outcome = if self.update(id, fields) {
            EditOutcome::Updated(id)
        } else {
            EditOutcome::Stale(id)
        };
        self.session.close();
        self.presenter.set_edit_surface(None);
        Ok(outcome)
    }

    /// Validates a single field when it loses focus.
    pub fn field_blur(&mut self, form: FormKind, field: Field, raw: &str) -> bool {
        let result = validate_field(field, raw);
        let errors = match form {
            FormKind::Add => &mut self.add_errors,
            FormKind::Edit => match self.session.form_mut() {
                Some(edit) => &mut edit.errors,
                None => return result.is_ok(),
            },
        };
        let valid = errors.apply(field, result);
        self.presenter.show_field_errors(form, errors);
        valid
    }

    /// Clears a field's error while the user is typing.
    pub fn field_input(&mut self, form: FormKind, field: Field) {
        let errors = match form {
            FormKind::Add => &mut self.add_errors,
            FormKind::Edit => match self.session.form_mut() {
                Some(edit) => &mut edit.errors,
                None => return,
            },
        };
        errors.clear(field);
        self.presenter.show_field_errors(form, errors);
    }
}
