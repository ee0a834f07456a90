use super::*;

impl QuizEngine {
    /// El alumno marcó o desmarcó una opción.
    ///
    /// Durante el cooldown el cambio se guarda igualmente y borra el resultado,
    /// pero el botón sigue bloqueado hasta que venza el temporizador.
    pub fn on_selection_changed(
        &mut self,
        slot: SlotId,
        label: &str,
        checked: bool,
    ) -> Result<SlotView, QuizError> {
        let instance = self.instance_mut(slot)?;
        let label = Label::new(label);
        if !instance.definition().has_option(&label) {
            return Err(QuizError::UnknownOption {
                quiz: instance.definition().id.clone(),
                label: label.to_string(),
            });
        }

        instance.set_option(label, checked);
        self.view(slot)
    }

    /// Click en "Check answer". La decisión se toma sobre el estado de la
    /// instancia, no sobre si el botón aparece deshabilitado.
    pub fn submit(&mut self, slot: SlotId) -> Result<SubmitOutcome, QuizError> {
        let instance = self.instance_mut(slot)?;

        if instance.is_cooling_down() {
            log::debug!("Slot {slot}: submit ignored during cooldown");
            return Ok(SubmitOutcome::Ignored);
        }

        match grading::grade(instance.definition(), instance.selected()) {
            Err(EmptySelection) => {
                instance.flag_empty_selection();
                Ok(SubmitOutcome::NeedsSelection)
            }
            Ok(verdict) => {
                let token = instance.record(verdict);
                log::debug!(
                    "Slot {slot}: quiz \"{}\" graded {verdict:?}",
                    instance.definition().id
                );
                Ok(SubmitOutcome::Graded {
                    verdict,
                    ticket: CooldownTicket { slot, token },
                })
            }
        }
    }

    /// Fin del cooldown. Devuelve la vista nueva, o `None` si el ticket ya no vale
    /// (otra corrección posterior, o la página se volvió a montar).
    pub fn cooldown_elapsed(&mut self, ticket: CooldownTicket) -> Option<SlotView> {
        let Ok(instance) = self.instance_mut(ticket.slot) else {
            log::debug!("Cooldown for slot {} outlived its page", ticket.slot);
            return None;
        };

        if !instance.finish_cooldown(ticket.token) {
            log::debug!("Stale cooldown token {} for slot {}", ticket.token, ticket.slot);
            return None;
        }

        self.view(ticket.slot).ok()
    }
}
