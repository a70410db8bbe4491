use std::cell::RefCell;
use std::fmt::{self, Formatter};
use std::io::{self, Read, Write};
use std::rc::Rc;

use coupler::buffers::{AnyBuffer, Buffers};
use coupler::bus::{BusDir, BusInfo, Format, Layout};
use coupler::engine::{Config, Engine};
use coupler::events::{Data, Events};
use coupler::format::clap::{ClapInfo, ClapPlugin};
use coupler::format::vst3::{Uuid, Vst3Info, Vst3Plugin};
use coupler::host::Host;
use coupler::params::{ParamId, ParamValue, Params};
use coupler::plugin::{Plugin, PluginInfo};
use coupler::view::{ParentWindow, RawParent, Size, View, ViewHost};

use reflector::platform::{
    App, AppMode, AppOptions, Bitmap, Event as WindowEvent, MouseButton, RawWindow, Response,
    Window, WindowContext, WindowOptions,
};
use tiny_skia::Pixmap;

use crate::buffer::AudioBlock;
use crate::bus::{self, BUS_NAME};
use crate::editor::canvas::{copy_to_framebuffer, pixmap_for};
use crate::editor::geom::Point;
use crate::editor::{self, Editor, EditorHost};
use crate::events::Event;
use crate::params::GainPanParams;
use crate::processor::{self, GainPanProcessor};
use crate::state;

// Capacity reserved for parameter changes within one block.
const EVENT_CAPACITY: usize = 1024;

fn to_format(format: bus::Format) -> Format {
    match format {
        bus::Format::Mono => Format::Mono,
        bus::Format::Stereo => Format::Stereo,
    }
}

fn to_layout(layout: &Layout) -> bus::Layout {
    match layout.formats.first() {
        Some(Format::Mono) => bus::Layout::MONO,
        Some(Format::Stereo) => bus::Layout::STEREO,
        _ => {
            log::debug!("unsupported bus layout, falling back to stereo");
            bus::Layout::STEREO
        }
    }
}

pub struct GainPan {
    params: GainPanParams,
}

impl Plugin for GainPan {
    type Engine = GainPanEngine;
    type View = GainPanView;

    fn info() -> PluginInfo {
        PluginInfo {
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
            vendor: crate::VENDOR.to_string(),
            url: crate::URL.to_string(),
            email: crate::EMAIL.to_string(),
            buses: vec![BusInfo {
                name: BUS_NAME.to_string(),
                dir: BusDir::InOut,
            }],
            layouts: bus::layouts()
                .iter()
                .map(|layout| Layout {
                    formats: vec![to_format(layout.output)],
                })
                .collect(),
            params: GainPanParams::params(),
            has_view: true,
        }
    }

    fn new(_host: Host) -> Self {
        log::info!("creating {} {}", crate::NAME, crate::VERSION);

        GainPan {
            params: GainPanParams::default(),
        }
    }

    fn set_param(&mut self, id: ParamId, value: ParamValue) {
        self.params.set_param(id, value);
    }

    fn get_param(&self, id: ParamId) -> ParamValue {
        self.params.get_param(id)
    }

    fn parse_param(&self, id: ParamId, text: &str) -> Option<ParamValue> {
        self.params.parse_param(id, text)
    }

    fn display_param(
        &self,
        id: ParamId,
        value: ParamValue,
        fmt: &mut Formatter,
    ) -> Result<(), fmt::Error> {
        self.params.display_param(id, value, fmt)
    }

    fn save(&self, output: &mut impl Write) -> io::Result<()> {
        state::save(&self.params, output)
    }

    fn load(&mut self, input: &mut impl Read) -> io::Result<()> {
        match state::load(input) {
            Ok(params) => {
                self.params = params;
                Ok(())
            }
            Err(err) => {
                log::warn!("failed to load state: {err}");
                Err(err)
            }
        }
    }

    fn engine(&mut self, config: Config) -> Self::Engine {
        let config = processor::Config {
            layout: to_layout(&config.layout),
            sample_rate: config.sample_rate,
            max_buffer_size: config.max_buffer_size,
        };

        GainPanEngine::new(self.params.clone(), &config)
    }

    fn view(&mut self, host: ViewHost, parent: &ParentWindow) -> Self::View {
        log::info!("opening editor");

        let editor = Editor::new(HostBridge(host), &self.params);
        GainPanView::open(editor, parent)
    }

    fn latency(&self, _config: &Config) -> u64 {
        0
    }
}

impl Vst3Plugin for GainPan {
    fn vst3_info() -> Vst3Info {
        let [a, b, c, d] = crate::VST3_CLASS_ID;

        Vst3Info {
            class_id: Uuid(a, b, c, d),
        }
    }
}

impl ClapPlugin for GainPan {
    fn clap_info() -> ClapInfo {
        ClapInfo {
            id: crate::CLAP_ID.to_string(),
        }
    }
}

/// Audio-thread half of the plugin. Host buffers are copied through
/// preallocated scratch channels so the processor sees plain slices.
pub struct GainPanEngine {
    processor: GainPanProcessor,
    scratch: [Vec<f32>; 2],
    events: Vec<Event>,
}

impl GainPanEngine {
    fn new(params: GainPanParams, config: &processor::Config) -> GainPanEngine {
        GainPanEngine {
            processor: GainPanProcessor::new(params, config),
            scratch: [
                vec![0.0; config.max_buffer_size],
                vec![0.0; config.max_buffer_size],
            ],
            events: Vec::with_capacity(EVENT_CAPACITY),
        }
    }

    fn collect_events(&mut self, events: Events) {
        self.events.clear();
        for event in events {
            if let Data::ParamChange { id, value } = event.data {
                self.events.push(Event::param_change(event.time, id, value));
            }
        }
    }
}

impl Engine for GainPanEngine {
    fn reset(&mut self) {
        self.processor.reset();
    }

    fn flush(&mut self, events: Events) {
        self.collect_events(events);
        self.processor.flush(&self.events);
    }

    fn process(&mut self, mut buffers: Buffers, events: Events) {
        self.collect_events(events);

        let Some(AnyBuffer::Mut(mut buffer)) = buffers.get(0) else {
            self.processor.flush(&self.events);
            return;
        };

        let len = buffer.len();
        let count = buffer.channel_count().min(self.scratch.len());

        // hosts may exceed the negotiated block size
        for channel in &mut self.scratch {
            if channel.len() < len {
                channel.resize(len, 0.0);
            }
        }

        for (index, channel) in self.scratch[..count].iter_mut().enumerate() {
            channel[..len].copy_from_slice(&buffer[index]);
        }

        let [left, right] = &mut self.scratch;
        let mut channels: [&mut [f32]; 2] = [&mut left[..len], &mut right[..len]];
        self.processor.process(&mut AudioBlock::new(&mut channels[..count]), &self.events);

        for (index, channel) in self.scratch[..count].iter().enumerate() {
            buffer[index].copy_from_slice(&channel[..len]);
        }
        for index in count..buffer.channel_count() {
            buffer[index].fill(0.0);
        }
    }
}

struct HostBridge(ViewHost);

impl EditorHost for HostBridge {
    fn begin_gesture(&mut self, id: ParamId) {
        self.0.begin_gesture(id);
    }

    fn set_param(&mut self, id: ParamId, value: ParamValue) {
        self.0.set_param(id, value);
    }

    fn end_gesture(&mut self, id: ParamId) {
        self.0.end_gesture(id);
    }
}

struct ViewState {
    editor: Editor<HostBridge>,
    pixmap: Option<Pixmap>,
    framebuffer: Vec<u32>,
    warned: bool,
}

impl ViewState {
    fn new(editor: Editor<HostBridge>) -> ViewState {
        ViewState {
            editor,
            pixmap: None,
            framebuffer: Vec::new(),
            warned: false,
        }
    }

    fn handle_event(&mut self, cx: &WindowContext, event: WindowEvent) -> Response {
        match event {
            WindowEvent::Frame => {
                self.frame(cx);
                Response::Ignore
            }
            WindowEvent::MouseMove(point) => {
                self.editor.mouse_move(Point::new(point.x as f32, point.y as f32));
                Response::Capture
            }
            WindowEvent::MouseDown(MouseButton::Left) => {
                if self.editor.mouse_down() {
                    Response::Capture
                } else {
                    Response::Ignore
                }
            }
            WindowEvent::MouseUp(MouseButton::Left) => {
                if self.editor.mouse_up() {
                    Response::Capture
                } else {
                    Response::Ignore
                }
            }
            WindowEvent::Scroll(delta) => {
                if self.editor.scroll(delta.y as f32) {
                    Response::Capture
                } else {
                    Response::Ignore
                }
            }
            _ => Response::Ignore,
        }
    }

    fn frame(&mut self, cx: &WindowContext) {
        let scale = cx.window().scale();
        let size = cx.window().size();
        let width = (size.width * scale).round() as u32;
        let height = (size.height * scale).round() as u32;

        let stale = match &self.pixmap {
            Some(pixmap) => pixmap.width() != width || pixmap.height() != height,
            None => true,
        };
        if stale {
            self.pixmap = pixmap_for(size.width, size.height, scale);
        }

        let Some(pixmap) = &mut self.pixmap else {
            if !self.warned {
                log::warn!("cannot allocate a {width}x{height} editor surface");
                self.warned = true;
            }
            return;
        };

        self.editor.render(pixmap, scale as f32);
        copy_to_framebuffer(pixmap, &mut self.framebuffer);

        let (width, height) = (pixmap.width() as usize, pixmap.height() as usize);
        cx.window().present(Bitmap::new(&self.framebuffer, width, height));
    }
}

pub struct GainPanView {
    state: Rc<RefCell<ViewState>>,
    window: Option<(App, Window)>,
}

impl GainPanView {
    fn open(editor: Editor<HostBridge>, parent: &ParentWindow) -> GainPanView {
        let state = Rc::new(RefCell::new(ViewState::new(editor)));

        let window = match open_window(Rc::clone(&state), parent) {
            Ok(window) => Some(window),
            Err(err) => {
                log::warn!("failed to open editor window: {err:?}");
                None
            }
        };

        GainPanView { state, window }
    }
}

fn open_window(
    state: Rc<RefCell<ViewState>>,
    parent: &ParentWindow,
) -> reflector::platform::Result<(App, Window)> {
    let app = AppOptions::new().mode(AppMode::Guest).build()?;

    let mut options = WindowOptions::new();
    options.size(reflector::platform::Size::new(
        editor::WIDTH as f64,
        editor::HEIGHT as f64,
    ));

    let raw_parent = match parent.as_raw() {
        RawParent::Win32(window) => RawWindow::Win32(window),
        RawParent::Cocoa(view) => RawWindow::Cocoa(view),
        RawParent::X11(window) => RawWindow::X11(window),
    };
    unsafe { options.raw_parent(raw_parent) };

    let window = options.open(app.handle(), move |cx, event| {
        // a nested event while the editor is busy is dropped
        match state.try_borrow_mut() {
            Ok(mut state) => state.handle_event(cx, event),
            Err(_) => Response::Ignore,
        }
    })?;

    window.show();

    Ok((app, window))
}

impl View for GainPanView {
    fn size(&self) -> Size {
        match &self.window {
            Some((_, window)) => {
                let size = window.size();
                Size {
                    width: size.width,
                    height: size.height,
                }
            }
            None => Size {
                width: editor::WIDTH as f64,
                height: editor::HEIGHT as f64,
            },
        }
    }

    fn param_changed(&mut self, id: ParamId, value: ParamValue) {
        // Fails only while the editor itself is reporting an edit, and the
        // editor already holds that value.
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.editor.param_changed(id, value);
        }
    }
}
