//! Iced GUI shell: the sketchpad window.
//!
//! Wires the canvas widget, mode toggle, clear button, and results panel to
//! the workflow state machine. Pointer events from the canvas are normalized
//! into [`PointerInput`] values, and finished strokes dispatch prediction
//! requests as async commands whose results come back as messages.

use std::sync::Arc;

use iced::executor;
use iced::mouse;
use iced::theme::{self, Theme};
use iced::touch;
use iced::widget::canvas::event::{self, Event};
use iced::widget::canvas::{self, Canvas};
use iced::widget::image::{Handle, Image};
use iced::widget::{Column, Row, button, column, container, row, scrollable, text};
use iced::{
    Alignment, Application, Color, Command, Element, Length, Point, Rectangle, Settings, Size,
};

use crate::config::Config;
use crate::draw::{self, BLACK, CANVAS_HEIGHT, CANVAS_WIDTH, WHITE};
use crate::input::{PointerInput, PredictionRequest, RecognizerState, canvas_position};
use crate::predict::{
    PredictClient, Prediction, RecognizerBackend, RecognizerMode, perform_prediction,
};
use crate::ui;

/// Runs the sketchpad window until it is closed.
pub fn run(config: Config) -> iced::Result {
    let mut settings = Settings::with_flags(config);
    settings.window.size = Size::new(460.0, 820.0);
    settings.window.resizable = true;
    DigitScribe::run(settings)
}

struct DigitScribe {
    state: RecognizerState,
    backend: Arc<PredictClient>,
    stroke_thickness: f64,
    low_confidence_threshold: f64,
    canvas_cache: canvas::Cache,
    /// Decoded preprocessed-image thumbnails, index-aligned with predictions
    thumbnails: Vec<Option<Handle>>,
}

#[derive(Debug, Clone)]
enum Message {
    Pointer(PointerInput),
    ModeSelected(RecognizerMode),
    ClearPressed,
    PredictionResolved {
        seq: u64,
        outcome: Result<Vec<Prediction>, String>,
    },
}

impl Application for DigitScribe {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Config;

    fn new(config: Self::Flags) -> (Self, Command<Self::Message>) {
        let initial_mode = config.initial_mode();
        let app = Self {
            state: RecognizerState::new(initial_mode),
            backend: Arc::new(PredictClient::new(config.backend.base_url)),
            stroke_thickness: config.drawing.stroke_thickness,
            low_confidence_threshold: config.ui.low_confidence_threshold,
            canvas_cache: canvas::Cache::new(),
            thumbnails: Vec::new(),
        };

        log::debug!("Prediction client ready at {}", app.backend.base_url());

        (app, Command::none())
    }

    fn title(&self) -> String {
        "Digitscribe".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Command<Self::Message> {
        match message {
            Message::Pointer(input) => {
                let command = match self.state.on_pointer(input) {
                    Some(request) => self.dispatch_prediction(request),
                    None => Command::none(),
                };
                self.sync_canvas();
                command
            }
            Message::ModeSelected(mode) => {
                // Predictions from the previous mode are kept on purpose.
                self.state.set_mode(mode);
                Command::none()
            }
            Message::ClearPressed => {
                self.state.clear();
                self.thumbnails.clear();
                self.sync_canvas();
                Command::none()
            }
            Message::PredictionResolved { seq, outcome } => {
                self.state.resolve(seq, outcome);
                self.rebuild_thumbnails();
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let mode = self.state.mode();

        let toggle = row![
            self.mode_button(RecognizerMode::Single),
            self.mode_button(RecognizerMode::Multi),
        ]
        .spacing(8);

        let description = text(ui::mode_description(mode)).size(14);

        let sketchpad = Canvas::new(SketchPad {
            state: &self.state,
            cache: &self.canvas_cache,
            thickness: self.stroke_thickness,
        })
        .width(Length::Fixed(CANVAS_WIDTH as f32))
        .height(Length::Fixed(CANVAS_HEIGHT as f32));

        let clear = button(text("Clear Canvas"))
            .style(theme::Button::Secondary)
            .on_press(Message::ClearPressed);

        let content = column![
            toggle,
            description,
            container(sketchpad).padding(4).style(theme::Container::Box),
            clear,
            self.results_view(),
        ]
        .spacing(14)
        .align_items(Alignment::Center);

        container(scrollable(content))
            .width(Length::Fill)
            .center_x()
            .padding(16)
            .into()
    }
}

impl DigitScribe {
    /// Serializes the canvas and spawns the prediction future for `request`.
    ///
    /// A failed or empty serialization aborts the request without surfacing a
    /// user-visible error; the condition is transient and non-actionable.
    fn dispatch_prediction(&mut self, request: PredictionRequest) -> Command<Message> {
        // A click without movement still predicts, on an all-white canvas.
        if self.state.sketch.is_blank() {
            log::debug!("Submitting a visually blank canvas");
        }

        let png = match draw::encode_png(&self.state.sketch, self.stroke_thickness) {
            Ok(png) if !png.is_empty() => png,
            Ok(_) => {
                log::warn!("Canvas serialization produced no data; skipping prediction");
                self.state.cancel_pending(request.seq);
                return Command::none();
            }
            Err(err) => {
                log::warn!("Canvas serialization failed: {err}; skipping prediction");
                self.state.cancel_pending(request.seq);
                return Command::none();
            }
        };

        let backend: Arc<dyn RecognizerBackend> = self.backend.clone();
        let PredictionRequest { seq, mode } = request;

        Command::perform(
            async move { perform_prediction(mode, png, backend).await },
            move |result| Message::PredictionResolved {
                seq,
                outcome: result.map_err(|err| ui::error_message(mode, &err)),
            },
        )
    }

    fn sync_canvas(&mut self) {
        if self.state.take_needs_redraw() {
            self.canvas_cache.clear();
        }
    }

    fn rebuild_thumbnails(&mut self) {
        self.thumbnails = self
            .state
            .predictions()
            .iter()
            .map(|prediction| {
                prediction
                    .preprocessed_image
                    .as_deref()
                    .and_then(ui::decode_preprocessed)
                    .map(Handle::from_memory)
            })
            .collect();
    }

    fn mode_button(&self, mode: RecognizerMode) -> Element<'_, Message> {
        let style = if self.state.mode() == mode {
            theme::Button::Primary
        } else {
            theme::Button::Secondary
        };

        button(text(ui::mode_label(mode)))
            .style(style)
            .on_press(Message::ModeSelected(mode))
            .into()
    }

    fn results_view(&self) -> Element<'_, Message> {
        let mode = self.state.mode();

        let content: Element<'_, Message> = match ui::results_panel(&self.state) {
            ui::ResultsPanel::Loading => text(ui::LOADING_LABEL).size(16).into(),
            ui::ResultsPanel::Error(message) => text(message)
                .size(16)
                .style(theme::Text::Color(Color::from_rgb(0.9, 0.4, 0.4)))
                .into(),
            ui::ResultsPanel::Placeholder => text(ui::PLACEHOLDER).size(16).into(),
            ui::ResultsPanel::Cards(predictions) => self.cards_view(mode, predictions),
        };

        container(content)
            .width(Length::Fill)
            .padding(12)
            .center_x()
            .into()
    }

    fn cards_view(&self, mode: RecognizerMode, predictions: &[Prediction]) -> Element<'_, Message> {
        let mut cards = Row::new().spacing(12).align_items(Alignment::Center);
        for (index, prediction) in predictions.iter().enumerate() {
            cards = cards.push(self.card_view(mode, index, prediction));
        }

        let mut panel = Column::new()
            .spacing(12)
            .align_items(Alignment::Center)
            .push(text(ui::results_heading(mode)).size(24))
            .push(scrollable(cards).direction(
                scrollable::Direction::Horizontal(scrollable::Properties::default()),
            ));

        if ui::has_alternatives(predictions) {
            panel = panel.push(self.alternatives_view(predictions));
        }

        panel.into()
    }

    fn card_view(
        &self,
        mode: RecognizerMode,
        index: usize,
        prediction: &Prediction,
    ) -> Element<'_, Message> {
        let mut card = Column::new().spacing(6).align_items(Alignment::Center);

        if let Some(Some(handle)) = self.thumbnails.get(index) {
            card = card
                .push(Image::new(handle.clone()).width(80).height(80))
                .push(text("Model Input").size(12));
        }

        card = card
            .push(text(prediction.digit.to_string()).size(72))
            .push(text(ui::confidence_label(prediction.confidence)).size(16));

        if ui::is_low_confidence(prediction.confidence, self.low_confidence_threshold) {
            card = card.push(
                text(ui::LOW_CONFIDENCE_LABEL)
                    .size(14)
                    .style(theme::Text::Color(Color::from_rgb(0.95, 0.8, 0.25))),
            );
        }

        // Only multi mode localizes digits, so only its cards show an origin.
        if mode == RecognizerMode::Multi {
            card = card.push(
                text(ui::origin_label(&prediction.bounding_box))
                    .size(14)
                    .style(theme::Text::Color(Color::from_rgb(0.4, 0.6, 0.95))),
            );
        }

        container(card)
            .padding(12)
            .style(theme::Container::Box)
            .into()
    }

    fn alternatives_view(&self, predictions: &[Prediction]) -> Element<'_, Message> {
        let mut panel = Column::new()
            .spacing(8)
            .push(text(ui::ALTERNATIVES_HEADING).size(14));

        for prediction in predictions {
            if prediction.alternatives.is_empty() {
                continue;
            }

            let mut line = Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(text(format!("{} could also be:", prediction.digit)).size(14));

            for alternative in &prediction.alternatives {
                line = line.push(
                    text(format!(
                        "{} ({})",
                        alternative.digit,
                        ui::confidence_label(alternative.confidence)
                    ))
                    .size(14),
                );
            }

            panel = panel.push(container(line).padding(8).style(theme::Container::Box));
        }

        panel.into()
    }
}

/// Canvas program translating raw pointer events into workflow messages.
///
/// Mouse and touch coordinates both go through [`canvas_position`] so the two
/// input kinds map to identical strokes. Touch events are captured to keep
/// the platform from turning them into scroll gestures.
struct SketchPad<'a> {
    state: &'a RecognizerState,
    cache: &'a canvas::Cache,
    thickness: f64,
}

/// Canvas-local interaction state: the finger currently drawing, if any.
///
/// Only the first touch point is tracked; additional fingers are ignored.
#[derive(Debug, Default)]
struct PadState {
    active_finger: Option<touch::Finger>,
}

impl SketchPad<'_> {
    fn local(&self, position: Point, bounds: Rectangle) -> (f64, f64) {
        canvas_position(
            position.x as f64,
            position.y as f64,
            bounds.x as f64,
            bounds.y as f64,
        )
    }

    fn stroking(&self) -> bool {
        self.state.stroke_in_progress().is_some()
    }
}

impl canvas::Program<Message> for SketchPad<'_> {
    type State = PadState;

    fn update(
        &self,
        pad: &mut PadState,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match event {
            Event::Mouse(mouse_event) => match mouse_event {
                mouse::Event::ButtonPressed(mouse::Button::Left) => match cursor.position() {
                    Some(position) if bounds.contains(position) => {
                        let (x, y) = self.local(position, bounds);
                        (
                            event::Status::Captured,
                            Some(Message::Pointer(PointerInput::Down { x, y })),
                        )
                    }
                    _ => (event::Status::Ignored, None),
                },
                mouse::Event::CursorMoved { .. } if self.stroking() => match cursor.position() {
                    Some(position) if bounds.contains(position) => {
                        let (x, y) = self.local(position, bounds);
                        (
                            event::Status::Captured,
                            Some(Message::Pointer(PointerInput::Move { x, y })),
                        )
                    }
                    // Dragging off the canvas finalizes the stroke.
                    _ => (event::Status::Ignored, Some(Message::Pointer(PointerInput::Leave))),
                },
                mouse::Event::ButtonReleased(mouse::Button::Left) if self.stroking() => {
                    (event::Status::Captured, Some(Message::Pointer(PointerInput::Up)))
                }
                _ => (event::Status::Ignored, None),
            },
            Event::Touch(touch_event) => match touch_event {
                touch::Event::FingerPressed { id, position } => {
                    if pad.active_finger.is_none() && bounds.contains(position) {
                        pad.active_finger = Some(id);
                        let (x, y) = self.local(position, bounds);
                        (
                            event::Status::Captured,
                            Some(Message::Pointer(PointerInput::Down { x, y })),
                        )
                    } else {
                        (event::Status::Ignored, None)
                    }
                }
                touch::Event::FingerMoved { id, position } => {
                    if pad.active_finger != Some(id) {
                        (event::Status::Ignored, None)
                    } else if bounds.contains(position) {
                        let (x, y) = self.local(position, bounds);
                        (
                            event::Status::Captured,
                            Some(Message::Pointer(PointerInput::Move { x, y })),
                        )
                    } else {
                        pad.active_finger = None;
                        (event::Status::Captured, Some(Message::Pointer(PointerInput::Leave)))
                    }
                }
                touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. } => {
                    if pad.active_finger == Some(id) {
                        pad.active_finger = None;
                        (event::Status::Captured, Some(Message::Pointer(PointerInput::Up)))
                    } else {
                        (event::Status::Ignored, None)
                    }
                }
            },
            Event::Keyboard(_) => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _pad: &PadState,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let committed = self.cache.draw(renderer, bounds.size(), |frame| {
            frame.fill_rectangle(Point::ORIGIN, frame.size(), ink(WHITE));
            for stroke in &self.state.sketch.strokes {
                draw_polyline(frame, &stroke.points, self.thickness);
            }
        });

        // The stroke being drawn lives on an uncached layer.
        let mut live = canvas::Frame::new(renderer, bounds.size());
        if let Some(points) = self.state.stroke_in_progress() {
            draw_polyline(&mut live, points, self.thickness);
        }

        vec![committed, live.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _pad: &PadState,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

fn draw_polyline(frame: &mut canvas::Frame, points: &[(f64, f64)], thickness: f64) {
    // A single point has no segment; the raster stays untouched as well.
    if points.len() < 2 {
        return;
    }

    let path = canvas::Path::new(|builder| {
        builder.move_to(Point::new(points[0].0 as f32, points[0].1 as f32));
        for &(x, y) in &points[1..] {
            builder.line_to(Point::new(x as f32, y as f32));
        }
    });

    frame.stroke(
        &path,
        canvas::Stroke {
            line_cap: canvas::LineCap::Round,
            line_join: canvas::LineJoin::Round,
            ..canvas::Stroke::default()
                .with_width(thickness as f32)
                .with_color(ink(BLACK))
        },
    );
}

fn ink(color: crate::draw::Color) -> Color {
    Color::from_rgba(
        color.r as f32,
        color.g as f32,
        color.b as f32,
        color.a as f32,
    )
}
