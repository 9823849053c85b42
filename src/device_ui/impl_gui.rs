use crate::device_ui::interface::{DeviceUi, DeviceUiEvent, NoticeSeverity, ViewFrame};
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

struct SorterWindow {
    frame: Arc<Mutex<ViewFrame>>,
    event_sender: Sender<DeviceUiEvent>,
    preview: Option<egui::TextureHandle>,
}

impl eframe::App for SorterWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_dropped_files(ctx);

        let frame = self.frame.lock().unwrap().clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Waste Sorter");
            });
            ui.add_space(8.0);

            ui.label(&frame.status);
            ui.label("Drop a JPEG or PNG image onto this window.");

            if ui.button("Clear Image").clicked() {
                self.preview = None;
                let _ = self.event_sender.send(DeviceUiEvent::ClearPressed);
            }

            if let Some(preview) = &self.preview {
                let size = scaled_preview_size(preview.size(), 260.0);
                ui.image(egui::load::SizedTexture::new(preview.id(), size));
            }

            if let Some(result) = &frame.result {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("Prediction: {}", result.label))
                        .strong()
                        .color(egui::Color32::from_rgb(60, 160, 60)),
                );
                ui.label(format!("Confidence: {}", result.confidence));
                ui.label(&result.description);
            }

            if let Some(notice) = &frame.notice {
                let color = match notice.severity {
                    NoticeSeverity::Warning => egui::Color32::from_rgb(200, 150, 0),
                    NoticeSeverity::Error => egui::Color32::from_rgb(200, 60, 60),
                };
                ui.label(egui::RichText::new(&notice.text).color(color));
            }

            ui.separator();
            ui.heading("Prediction History");

            egui::Grid::new("prediction_history")
                .striped(true)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Timestamp").strong());
                    ui.label(egui::RichText::new("Filename").strong());
                    ui.label(egui::RichText::new("Prediction").strong());
                    ui.label(egui::RichText::new("Confidence").strong());
                    ui.end_row();

                    for row in &frame.history {
                        ui.label(&row.timestamp);
                        ui.label(&row.filename);
                        ui.label(&row.label);
                        ui.label(&row.confidence);
                        ui.end_row();
                    }
                });
        });

        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

impl SorterWindow {
    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some((filename, bytes)) = read_dropped_file(&file) {
                self.update_preview(ctx, &bytes);
                let _ = self
                    .event_sender
                    .send(DeviceUiEvent::ImageSelected { filename, bytes });
            }
        }
    }

    fn update_preview(&mut self, ctx: &egui::Context, bytes: &[u8]) {
        self.preview = image::load_from_memory(bytes).ok().map(|img| {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            ctx.load_texture("uploaded-image", color_image, egui::TextureOptions::default())
        });
    }
}

fn read_dropped_file(file: &egui::DroppedFile) -> Option<(String, Vec<u8>)> {
    if let Some(bytes) = &file.bytes {
        if !has_supported_extension(&file.name) {
            return None;
        }
        return Some((file.name.clone(), bytes.to_vec()));
    }

    let path = file.path.as_ref()?;
    if !has_supported_extension(&path.to_string_lossy()) {
        return None;
    }
    let filename = path.file_name()?.to_string_lossy().to_string();
    let bytes = std::fs::read(path).ok()?;
    Some((filename, bytes))
}

fn has_supported_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".jpg") || lower.ends_with(".jpeg") || lower.ends_with(".png")
}

fn scaled_preview_size(size: [usize; 2], max_width: f32) -> egui::Vec2 {
    let (width, height) = (size[0] as f32, size[1] as f32);
    if width <= max_width {
        egui::vec2(width, height)
    } else {
        egui::vec2(max_width, height * max_width / width)
    }
}

pub struct DeviceUiGui {
    frame: Arc<Mutex<ViewFrame>>,
    event_sender: Sender<DeviceUiEvent>,
    event_receiver: Mutex<Option<Receiver<DeviceUiEvent>>>,
    logger: Arc<dyn Logger>,
}

impl DeviceUiGui {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        let (event_sender, event_receiver) = channel();
        Self {
            frame: Arc::new(Mutex::new(ViewFrame::default())),
            event_sender,
            event_receiver: Mutex::new(Some(event_receiver)),
            logger: logger.with_namespace("device_ui").with_namespace("gui"),
        }
    }
}

impl DeviceUi for DeviceUiGui {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let _ = self.logger.info("Opening window...");

        let frame = self.frame.clone();
        let event_sender = self.event_sender.clone();

        // The window runs in its own thread and blocks there until closed
        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default().with_inner_size([440.0, 640.0]),
                ..Default::default()
            };

            let window = SorterWindow {
                frame,
                event_sender,
                preview: None,
            };

            let _ = eframe::run_native("Waste Sorter", options, Box::new(|_cc| Box::new(window)));
        });

        Ok(())
    }

    fn events(&self) -> Receiver<DeviceUiEvent> {
        self.event_receiver
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| channel().1)
    }

    fn render(&self, frame: &ViewFrame) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        *self.frame.lock().unwrap() = frame.clone();
        Ok(())
    }
}
