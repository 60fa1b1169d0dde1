//! Per-event orchestration.
//!
//! The router owns the accumulator registry and one module state per enabled
//! observable. Module state is immutable after booking; every per-event
//! mutation goes through the registry, so processing an event cannot leak
//! state into the next one.

use log::warn;

use quench_core::kinematics::fold_angle;
use quench_core::{
    AnalysisConfig, ErrorInfo, Event, Jet, JetCuts, ParticleCuts, QuenchError, SubjetFinder,
};
use quench_hist::{Binning, HistId, HistogramSet};

use quench_cluster::KtSubjetFinder;

use crate::correlation::{is_away_side, TriggerClass};
use crate::dijet::{DijetOutcome, DijetSelection};
use crate::edge_table::EdgeTable;
use crate::planes::{PlaneClass, SymmetryPlaneSet};
use crate::settings::{
    range_labels, AzimuthSettings, CorrelationSettings, DijetAsymmetrySettings, JetMassSettings,
    ObservableSettings, PipelineSettings, PlaneSpectraSettings, RapiditySpectraSettings,
    SubjetFragmentationSettings, TaggedSpectraSettings,
};
use crate::subjets::extract_fragmentation;

fn radius_label(radius: f64) -> String {
    format!("{radius}")
}

fn radius_suffix(radius: f64) -> String {
    format!("r{}", format!("{radius}").replace('.', ""))
}

fn scoped(label: &str, name: &str) -> String {
    format!("{label}/{name}")
}

/// Drives a declarative observable list over an event stream.
pub struct ObservableRouter {
    modules: Vec<Module>,
    hist: HistogramSet,
    finder: Box<dyn SubjetFinder>,
    events: u64,
}

impl ObservableRouter {
    /// Builds the router with the default kt subjet finder.
    pub fn from_settings(settings: &PipelineSettings) -> Result<Self, QuenchError> {
        Self::with_finder(settings, Box::new(KtSubjetFinder))
    }

    /// Builds the router with a caller-supplied subjet finder.
    pub fn with_finder(
        settings: &PipelineSettings,
        finder: Box<dyn SubjetFinder>,
    ) -> Result<Self, QuenchError> {
        settings.config.validate()?;
        let mut hist = HistogramSet::new();
        let mut modules = Vec::with_capacity(settings.observables.len());
        for observable in &settings.observables {
            modules.push(Module::book(observable, &settings.config, &mut hist)?);
        }
        Ok(Self {
            modules,
            hist,
            finder,
            events: 0,
        })
    }

    /// Classifies one event and accumulates its contributions.
    pub fn process_event(&mut self, event: &Event) {
        for module in &self.modules {
            module.process(event, &mut self.hist, self.finder.as_ref());
        }
        self.events += 1;
    }

    /// Number of events processed so far.
    pub fn events_processed(&self) -> u64 {
        self.events
    }

    /// Read access to the accumulators mid-run.
    pub fn accumulators(&self) -> &HistogramSet {
        &self.hist
    }

    /// Applies the end-of-run normalizations and releases the accumulators.
    pub fn finalize(mut self) -> HistogramSet {
        for module in &self.modules {
            module.finalize(&mut self.hist);
        }
        self.hist
    }
}

enum Module {
    Rapidity(RapidityModule),
    Dijet(DijetModule),
    Planes(PlanesModule),
    Subjets(SubjetsModule),
    Correlation(CorrelationModule),
    Azimuth(AzimuthModule),
    JetMass(JetMassModule),
    Tagged(TaggedModule),
}

impl Module {
    fn book(
        settings: &ObservableSettings,
        config: &AnalysisConfig,
        hist: &mut HistogramSet,
    ) -> Result<Self, QuenchError> {
        match settings {
            ObservableSettings::RapiditySpectra(s) => {
                RapidityModule::book(s, config, hist).map(Module::Rapidity)
            }
            ObservableSettings::DijetAsymmetry(s) => {
                DijetModule::book(s, config, hist).map(Module::Dijet)
            }
            ObservableSettings::PlaneSpectra(s) => {
                PlanesModule::book(s, config, hist).map(Module::Planes)
            }
            ObservableSettings::SubjetFragmentation(s) => {
                SubjetsModule::book(s, hist).map(Module::Subjets)
            }
            ObservableSettings::HadronJetCorrelation(s) => {
                CorrelationModule::book(s, hist).map(Module::Correlation)
            }
            ObservableSettings::AzimuthDistribution(s) => {
                AzimuthModule::book(s, config, hist).map(Module::Azimuth)
            }
            ObservableSettings::JetMass(s) => {
                JetMassModule::book(s, config, hist).map(Module::JetMass)
            }
            ObservableSettings::TaggedSpectra(s) => {
                TaggedModule::book(s, config, hist).map(Module::Tagged)
            }
        }
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet, finder: &dyn SubjetFinder) {
        match self {
            Module::Rapidity(m) => m.process(event, hist),
            Module::Dijet(m) => m.process(event, hist),
            Module::Planes(m) => m.process(event, hist),
            Module::Subjets(m) => m.process(event, hist, finder),
            Module::Correlation(m) => m.process(event, hist),
            Module::Azimuth(m) => m.process(event, hist),
            Module::JetMass(m) => m.process(event, hist),
            Module::Tagged(m) => m.process(event, hist),
        }
    }

    fn finalize(&self, hist: &mut HistogramSet) {
        if let Module::Correlation(m) = self {
            m.finalize(hist);
        }
    }
}

struct RapidityModule {
    cuts: JetCuts,
    table: EdgeTable,
    slices: Vec<HistId>,
    inclusive: Vec<(f64, HistId)>,
    all: HistId,
}

impl RapidityModule {
    fn book(
        settings: &RapiditySpectraSettings,
        config: &AnalysisConfig,
        hist: &mut HistogramSet,
    ) -> Result<Self, QuenchError> {
        let r = radius_label(config.jet_radius);
        let table = EdgeTable::new(settings.abs_rap_edges.clone())?;
        let mut slices = Vec::with_capacity(table.len());
        for label in range_labels(0.0, table.edges()) {
            slices.push(hist.book(
                scoped(&settings.label, &format!("JetpT_{label}_R{r}")),
                &settings.pt_binning,
            )?);
        }
        let mut inclusive = Vec::with_capacity(settings.inclusive_ceilings.len());
        for &ceil in &settings.inclusive_ceilings {
            let id = hist.book(
                scoped(&settings.label, &format!("JetpT_0_{ceil}_R{r}")),
                &settings.pt_binning,
            )?;
            inclusive.push((ceil, id));
        }
        let all = hist.book(
            scoped(&settings.label, &format!("JetpT_R{r}")),
            &settings.pt_binning,
        )?;
        Ok(Self {
            cuts: settings.jet_cuts.clone(),
            table,
            slices,
            inclusive,
            all,
        })
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet) {
        for jet in self.cuts.filter(&event.jets) {
            let y = jet.abs_rap();
            if let Some(slice) = self.table.bin(y) {
                hist.fill(self.slices[slice], jet.pt);
            }
            for &(ceil, id) in &self.inclusive {
                if y <= ceil {
                    hist.fill(id, jet.pt);
                }
            }
            hist.fill(self.all, jet.pt);
        }
    }
}

struct DijetModule {
    cuts: JetCuts,
    selection: DijetSelection,
    table: EdgeTable,
    xj: Vec<HistId>,
    lead: HistId,
    sublead: HistId,
    counter: HistId,
}

impl DijetModule {
    fn book(
        settings: &DijetAsymmetrySettings,
        config: &AnalysisConfig,
        hist: &mut HistogramSet,
    ) -> Result<Self, QuenchError> {
        let r = radius_label(config.jet_radius);
        let table = EdgeTable::new(settings.lead_pt_edges.clone())?;
        let mut xj = Vec::with_capacity(table.len());
        for label in range_labels(settings.lead_pt_floor, table.edges()) {
            xj.push(hist.book(
                scoped(&settings.label, &format!("xJ_{label}_R{r}")),
                &settings.xj_binning,
            )?);
        }
        let lead = hist.book(
            scoped(&settings.label, &format!("JetpT1_R{r}")),
            &settings.spectra_binning,
        )?;
        let sublead = hist.book(
            scoped(&settings.label, &format!("JetpT2_R{r}")),
            &settings.spectra_binning,
        )?;
        let counter = hist.book(
            scoped(&settings.label, &format!("xJ_counter_R{r}")),
            &Binning::uniform(2, -0.5, 1.5),
        )?;
        Ok(Self {
            cuts: settings.jet_cuts.clone(),
            selection: settings.selection.clone(),
            table,
            xj,
            lead,
            sublead,
            counter,
        })
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet) {
        let selected = self.cuts.filter(&event.jets);
        match self.selection.evaluate(&selected) {
            DijetOutcome::NoCandidate => {}
            DijetOutcome::Rejected { .. } => hist.fill(self.counter, 0.0),
            DijetOutcome::Accepted {
                lead_pt,
                sublead_pt,
                x_j,
                ..
            } => {
                hist.fill(self.counter, 1.0);
                hist.fill(self.lead, lead_pt);
                hist.fill(self.sublead, sublead_pt);
                if let Some(bin) = self.table.bin(lead_pt) {
                    hist.fill(self.xj[bin], x_j);
                }
            }
        }
    }
}

struct PlanesModule {
    cuts: JetCuts,
    window: Option<ParticleCuts>,
    pairs: Vec<(SymmetryPlaneSet, HistId, HistId)>,
    all: HistId,
}

impl PlanesModule {
    fn book(
        settings: &PlaneSpectraSettings,
        config: &AnalysisConfig,
        hist: &mut HistogramSet,
    ) -> Result<Self, QuenchError> {
        let r = radius_label(config.jet_radius);
        let mut pairs = Vec::with_capacity(settings.orders.len());
        for &order in &settings.orders {
            let psi = config.planes.angle_for(order).ok_or_else(|| {
                QuenchError::Config(
                    ErrorInfo::new("unconfigured-harmonic", "no plane angle for this order")
                        .with_context("order", order.to_string()),
                )
            })?;
            let set = SymmetryPlaneSet::new(order, psi)?;
            let in_id = hist.book(
                scoped(&settings.label, &format!("InPlaneSpec_N{order}_R{r}")),
                &settings.pt_binning,
            )?;
            let out_id = hist.book(
                scoped(&settings.label, &format!("OutPlaneSpec_N{order}_R{r}")),
                &settings.pt_binning,
            )?;
            pairs.push((set, in_id, out_id));
        }
        let all = hist.book(
            scoped(&settings.label, &format!("Spec_R{r}")),
            &settings.pt_binning,
        )?;
        Ok(Self {
            cuts: settings.jet_cuts.clone(),
            window: settings.constituent_window.clone(),
            pairs,
            all,
        })
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet) {
        for jet in self.cuts.filter(&event.jets) {
            if let Some(window) = &self.window {
                if !jet.has_constituent_passing(window) {
                    continue;
                }
            }
            for &(set, in_id, out_id) in &self.pairs {
                match set.classify(jet.phi) {
                    PlaneClass::InPlane => hist.fill(in_id, jet.pt),
                    PlaneClass::OutOfPlane => hist.fill(out_id, jet.pt),
                    PlaneClass::Neither => {}
                }
            }
            hist.fill(self.all, jet.pt);
        }
    }
}

struct RadiusFamily {
    radius: f64,
    inclusive: HistId,
    high: HistId,
    highd: HistId,
    custom: HistId,
}

struct SubjetsModule {
    cuts: JetCuts,
    families: Vec<RadiusFamily>,
    counter: HistId,
    high_max_pt: f64,
    highd_min_pt: f64,
}

impl SubjetsModule {
    fn book(
        settings: &SubjetFragmentationSettings,
        hist: &mut HistogramSet,
    ) -> Result<Self, QuenchError> {
        let mut families = Vec::with_capacity(settings.radii.len());
        for &radius in &settings.radii {
            let suffix = radius_suffix(radius);
            families.push(RadiusFamily {
                radius,
                inclusive: hist.book(
                    scoped(&settings.label, &format!("z_Full_{suffix}")),
                    &settings.inclusive_binning,
                )?,
                high: hist.book(
                    scoped(&settings.label, &format!("z_High_{suffix}")),
                    &settings.high_binning,
                )?,
                highd: hist.book(
                    scoped(&settings.label, &format!("z_HighD_{suffix}")),
                    &settings.highd_binning,
                )?,
                custom: hist.book(
                    scoped(&settings.label, &format!("z_Custom_{suffix}")),
                    &settings.custom_binning,
                )?,
            });
        }
        let counter = hist.book(
            scoped(&settings.label, "Number_Jets"),
            &Binning::uniform(2, -0.5, 1.5),
        )?;
        Ok(Self {
            cuts: settings.jet_cuts.clone(),
            families,
            counter,
            high_max_pt: settings.high_max_pt,
            highd_min_pt: settings.highd_min_pt,
        })
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet, finder: &dyn SubjetFinder) {
        for jet in self.cuts.filter(&event.jets) {
            for family in &self.families {
                let record = match extract_fragmentation(jet, family.radius, finder) {
                    Ok(record) => record,
                    Err(err) => {
                        warn!("skipping jet in subjet fragmentation: {err}");
                        continue;
                    }
                };
                hist.fill(family.custom, record.leading_z);
                if jet.pt < self.high_max_pt {
                    hist.fill(family.high, record.leading_z);
                    hist.fill(self.counter, 0.0);
                }
                if jet.pt > self.highd_min_pt {
                    hist.fill(family.highd, record.leading_z);
                    hist.fill(self.counter, 1.0);
                }
                for &z in &record.inclusive_z {
                    hist.fill(family.inclusive, z);
                }
            }
        }
    }
}

struct ClassState {
    class: TriggerClass,
    ntrig: HistId,
    all_jets: HistId,
    away: HistId,
}

struct CorrelationModule {
    jet_cuts: JetCuts,
    away_side_min: f64,
    acceptance_half_width: f64,
    classes: Vec<ClassState>,
}

impl CorrelationModule {
    fn book(settings: &CorrelationSettings, hist: &mut HistogramSet) -> Result<Self, QuenchError> {
        let mut classes = Vec::with_capacity(settings.classes.len());
        for class in &settings.classes {
            let label = &class.label;
            classes.push(ClassState {
                class: class.clone(),
                ntrig: hist.book(
                    scoped(&settings.label, &format!("hNtrig_{label}")),
                    &settings.pt_binning,
                )?,
                all_jets: hist.book(
                    scoped(&settings.label, &format!("Njet_all_{label}")),
                    &settings.pt_binning,
                )?,
                away: hist.book(
                    scoped(&settings.label, &format!("Njet_{label}")),
                    &settings.pt_binning,
                )?,
            });
        }
        Ok(Self {
            jet_cuts: settings.jet_cuts.clone(),
            away_side_min: settings.away_side_min,
            acceptance_half_width: settings.acceptance_half_width,
            classes,
        })
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet) {
        let jets: Vec<&Jet> = self.jet_cuts.filter(&event.jets);
        for state in &self.classes {
            for trigger in event.particles.iter().filter(|p| state.class.accepts(p)) {
                hist.fill(state.ntrig, trigger.pt);
                for jet in &jets {
                    hist.fill(state.all_jets, jet.pt);
                    if is_away_side(trigger.phi, jet.phi, self.away_side_min) {
                        hist.fill(state.away, jet.pt);
                    }
                }
            }
        }
    }

    fn finalize(&self, hist: &mut HistogramSet) {
        let factor = 1.0 / (2.0 * self.acceptance_half_width);
        for state in &self.classes {
            hist.scale(state.away, factor);
        }
    }
}

struct AzimuthModule {
    cuts: JetCuts,
    table: EdgeTable,
    hists: Vec<HistId>,
}

impl AzimuthModule {
    fn book(
        settings: &AzimuthSettings,
        config: &AnalysisConfig,
        hist: &mut HistogramSet,
    ) -> Result<Self, QuenchError> {
        let r = radius_label(config.jet_radius);
        let table = EdgeTable::new(settings.pt_edges.clone())?;
        let mut hists = Vec::with_capacity(table.len());
        for label in range_labels(settings.pt_floor, table.edges()) {
            hists.push(hist.book(
                scoped(&settings.label, &format!("{label}_phi_R{r}")),
                &settings.phi_binning,
            )?);
        }
        Ok(Self {
            cuts: settings.jet_cuts.clone(),
            table,
            hists,
        })
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet) {
        for jet in self.cuts.filter(&event.jets) {
            if let Some(bin) = self.table.bin(jet.pt) {
                hist.fill(self.hists[bin], fold_angle(jet.phi));
            }
        }
    }
}

struct JetMassModule {
    cuts: JetCuts,
    spectrum_cuts: JetCuts,
    mass_max_abs_eta: f64,
    mass_min_pt: f64,
    table: EdgeTable,
    windows: Vec<HistId>,
    open_window: HistId,
    spectrum: HistId,
}

impl JetMassModule {
    fn book(
        settings: &JetMassSettings,
        config: &AnalysisConfig,
        hist: &mut HistogramSet,
    ) -> Result<Self, QuenchError> {
        let digits = format!("{}", config.jet_radius).replace('.', "");
        let table = EdgeTable::new(settings.pt_window_edges.clone())?;
        let mut windows = Vec::with_capacity(table.len());
        for label in range_labels(settings.mass_min_pt, table.edges()) {
            windows.push(hist.book(
                scoped(&settings.label, &format!("Jet_Mass_{label}")),
                &settings.mass_binning,
            )?);
        }
        let top = table.edges()[table.len() - 1];
        let open_window = hist.book(
            scoped(&settings.label, &format!("Jet_Mass_{top}")),
            &settings.mass_binning,
        )?;
        let spectrum = hist.book(
            scoped(&settings.label, &format!("JetpT_NSub_{digits}")),
            &settings.spectrum_binning,
        )?;
        Ok(Self {
            cuts: settings.jet_cuts.clone(),
            spectrum_cuts: settings.spectrum_cuts.clone(),
            mass_max_abs_eta: settings.mass_max_abs_eta,
            mass_min_pt: settings.mass_min_pt,
            table,
            windows,
            open_window,
            spectrum,
        })
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet) {
        for jet in self.cuts.filter(&event.jets) {
            if self.spectrum_cuts.accepts(jet) {
                hist.fill(self.spectrum, jet.pt);
            }
            if jet.mass >= 0.0
                && jet.abs_eta() < self.mass_max_abs_eta
                && jet.pt >= self.mass_min_pt
            {
                match self.table.bin(jet.pt) {
                    Some(window) => hist.fill(self.windows[window], jet.mass),
                    None => hist.fill(self.open_window, jet.mass),
                }
            }
        }
    }
}

struct TaggedModule {
    cuts: JetCuts,
    midrap_max_abs_rap: f64,
    wide_max_abs_eta: f64,
    eta_space: f64,
    lead_window: ParticleCuts,
    midrap: HistId,
    wide: HistId,
    untagged: HistId,
    tagged: HistId,
}

impl TaggedModule {
    fn book(
        settings: &TaggedSpectraSettings,
        config: &AnalysisConfig,
        hist: &mut HistogramSet,
    ) -> Result<Self, QuenchError> {
        let r = radius_label(config.jet_radius);
        let midrap = hist.book(
            scoped(&settings.label, &format!("JetpT_R{r}")),
            &settings.midrap_binning,
        )?;
        let wide = hist.book(
            scoped(&settings.label, &format!("WidepT_R{r}")),
            &settings.wide_binning,
        )?;
        let untagged = hist.book(
            scoped(&settings.label, &format!("TrackpT_nolead_R{r}")),
            &settings.tagged_binning,
        )?;
        let tagged = hist.book(
            scoped(&settings.label, &format!("TrackpT_R{r}")),
            &settings.tagged_binning,
        )?;
        Ok(Self {
            cuts: settings.jet_cuts.clone(),
            midrap_max_abs_rap: settings.midrap_max_abs_rap,
            wide_max_abs_eta: settings.wide_max_abs_eta,
            eta_space: settings.eta_space,
            lead_window: ParticleCuts {
                min_pt: Some(settings.lead_min_constituent_pt),
                max_pt: None,
                max_abs_eta: None,
            },
            midrap,
            wide,
            untagged,
            tagged,
        })
    }

    fn process(&self, event: &Event, hist: &mut HistogramSet) {
        for jet in self.cuts.filter(&event.jets) {
            if jet.abs_rap() <= self.midrap_max_abs_rap {
                hist.fill(self.midrap, jet.pt);
            }
            if jet.abs_eta() <= self.wide_max_abs_eta {
                hist.fill(self.wide, jet.pt);
            }
            if jet.abs_eta() <= self.eta_space {
                hist.fill(self.untagged, jet.pt);
                if jet.has_constituent_passing(&self.lead_window) {
                    hist.fill(self.tagged, jet.pt);
                }
            }
        }
    }
}
