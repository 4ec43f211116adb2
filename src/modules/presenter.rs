use log::info;
use crate::modules::edit::{EditForm, FormKind};
use crate::modules::render::ViewModel;
use crate::modules::validation::FieldErrors;

/// The host page side of the list manager.
pub trait Presenter {
    fn render_lists(&mut self, view: &ViewModel);

    fn show_field_errors(&mut self, form: FormKind, errors: &FieldErrors);

    /// `None` hides the edit surface.
    fn set_edit_surface(&mut self, form: Option<&EditForm>);
}

/// Presenter that ignores everything, for headless use.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_lists(&mut self, _view: &ViewModel) {}

    fn show_field_errors(&mut self, _form: FormKind, _errors: &FieldErrors) {}

    fn set_edit_surface(&mut self, _form: Option<&EditForm>) {}
}

/// Writes surface changes to stdout and the log. Lists are printed by the caller.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    pub renders: usize,
}

impl Presenter for ConsolePresenter {
    fn render_lists(&mut self, view: &ViewModel) {
        self.renders += 1;
        info!("Rendered {} entries, {} recommended", view.all.len(), view.recommended.len());
    }

    fn show_field_errors(&mut self, form: FormKind, errors: &FieldErrors) {
        for (field, error) in errors.iter() {
            println!("[{form}] {field}: {error}");
        }
    }

    fn set_edit_surface(&mut self, form: Option<&EditForm>) {
        match form {
            Some(form) => println!("Editing {} ({})", form.id, form.values.title),
            None => println!("Edit surface closed"),
        }
    }
}
